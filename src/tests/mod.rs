#[cfg(test)]
mod member_list_tests {
    use crate::members::{
        generic_compare_members, Member, MemberArena, MemberGroup, MemberKind, MemberList,
        MemberListKind, MemberLists, Protection,
    };

    // Helper to build an arena holding one function member per name
    fn arena_with(names: &[&str]) -> (MemberArena, Vec<crate::members::MemberId>) {
        let mut arena = MemberArena::new();
        let ids = names
            .iter()
            .map(|name| arena.alloc(Member::new(*name, MemberKind::Function)))
            .collect();
        (arena, ids)
    }

    fn names_of(list: &MemberList, arena: &MemberArena) -> Vec<String> {
        list.iter()
            .map(|id| arena.get(id).name().to_string())
            .collect()
    }

    #[test]
    fn sort_orders_by_name_case_insensitively() {
        let (arena, ids) = arena_with(&["write", "Read", "apply"]);
        let mut list = MemberList::new(MemberListKind::PubMethods);
        for id in ids {
            list.push_back(id);
        }
        assert!(list.needs_sorting());

        list.sort(&arena);

        assert!(!list.needs_sorting());
        assert_eq!(names_of(&list, &arena), vec!["apply", "Read", "write"]);
    }

    #[test]
    fn insert_sorted_keeps_the_list_sorted() {
        let (mut arena, ids) = arena_with(&["write", "Read", "apply"]);
        let mut list = MemberList::new(MemberListKind::PubMethods);
        for id in ids {
            list.push_back(id);
        }
        list.sort(&arena);

        let close = arena.alloc(Member::new("Close", MemberKind::Function));
        list.insert_sorted(&arena, close);

        assert!(!list.needs_sorting());
        assert_eq!(
            names_of(&list, &arena),
            vec!["apply", "Close", "Read", "write"]
        );
    }

    #[test]
    fn insert_sorted_handles_every_position() {
        let (mut arena, ids) = arena_with(&["bravo", "delta"]);
        let mut list = MemberList::new(MemberListKind::Functions);
        for id in ids {
            list.push_back(id);
        }
        list.sort(&arena);

        for name in ["alpha", "charlie", "echo"] {
            let id = arena.alloc(Member::new(name, MemberKind::Function));
            list.insert_sorted(&arena, id);
        }

        assert_eq!(
            names_of(&list, &arena),
            vec!["alpha", "bravo", "charlie", "delta", "echo"]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let (arena, ids) = arena_with(&["gamma", "Alpha", "beta"]);
        let mut list = MemberList::new(MemberListKind::Functions);
        for id in ids {
            list.push_back(id);
        }

        list.sort(&arena);
        let first = names_of(&list, &arena);
        list.sort(&arena);

        assert_eq!(first, names_of(&list, &arena));
    }

    #[test]
    fn comparator_breaks_name_ties_deterministically() {
        let a = Member::new("poll", MemberKind::Function);
        let b = Member::new("poll", MemberKind::Variable).with_protection(Protection::Private);

        // equal names fall back to kind, so the order is total
        assert_eq!(
            generic_compare_members(&a, &b),
            std::cmp::Ordering::Less
        );
        assert_eq!(
            generic_compare_members(&b, &a),
            std::cmp::Ordering::Greater
        );
        assert_eq!(generic_compare_members(&a, &a), std::cmp::Ordering::Equal);
    }

    #[test]
    fn remove_is_identity_based_and_tolerates_absence() {
        let (mut arena, ids) = arena_with(&["first", "second"]);
        let mut list = MemberList::new(MemberListKind::Variables);
        list.push_back(ids[0]);

        let absent = arena.alloc(Member::new("absent", MemberKind::Variable));
        list.remove(absent); // no-op
        assert_eq!(list.len(), 1);

        assert!(list.contains(ids[0]));
        assert!(!list.contains(ids[1]));

        list.remove(ids[0]);
        assert!(list.is_empty());
    }

    #[test]
    fn declaration_counts_classify_visibility_and_enum_values() {
        let mut arena = MemberArena::new();
        let visible = arena.alloc(Member::new("shown", MemberKind::Function));
        let hidden =
            arena.alloc(Member::new("hidden", MemberKind::Function).with_visibility(false, false));
        let value = arena.alloc(Member::new("RED", MemberKind::EnumValue));

        let mut list = MemberList::new(MemberListKind::PubMethods);
        list.push_back(visible);
        list.push_back(hidden);
        list.push_back(value);

        list.count_declaration_members(&arena);

        assert_eq!(list.num_dec_members(), 2);
        assert_eq!(list.num_dec_enum_values(), 1);
    }

    #[test]
    fn hidden_anonymous_enum_surfaces_its_visible_values() {
        let mut arena = MemberArena::new();
        let red = arena.alloc(Member::new("RED", MemberKind::EnumValue));
        let green = arena.alloc(
            Member::new("GREEN", MemberKind::EnumValue).with_visibility(false, false),
        );
        let mut anon = Member::new("@1", MemberKind::Enum).with_visibility(false, false);
        anon.add_enum_value(red);
        anon.add_enum_value(green);
        let anon = arena.alloc(anon);

        let mut list = MemberList::new(MemberListKind::Enums);
        list.push_back(anon);

        list.count_declaration_members(&arena);

        assert_eq!(list.num_dec_members(), 1);
        assert_eq!(list.num_dec_enum_values(), 1);
    }

    #[test]
    fn documentation_counts_use_the_detail_flag() {
        let mut arena = MemberArena::new();
        let documented =
            arena.alloc(Member::new("detailed", MemberKind::Function).with_visibility(true, true));
        let brief_only = arena.alloc(Member::new("brief", MemberKind::Function));

        let mut list = MemberList::new(MemberListKind::Functions);
        list.push_back(documented);
        list.push_back(brief_only);

        list.count_documentation_members(&arena);

        assert_eq!(list.num_doc_members(), 1);
        assert_eq!(list.num_doc_enum_values(), 0);
    }

    #[test]
    fn counting_twice_keeps_the_first_result() {
        let mut arena = MemberArena::new();
        let id = arena.alloc(Member::new("stable", MemberKind::Function));
        let mut list = MemberList::new(MemberListKind::Functions);
        list.push_back(id);

        list.count_declaration_members(&arena);
        let first = list.num_dec_members();
        list.count_declaration_members(&arena);

        assert_eq!(first, list.num_dec_members());
    }

    #[test]
    #[should_panic(expected = "read before count_declaration_members")]
    fn reading_declaration_counts_before_computing_panics() {
        let list = MemberList::new(MemberListKind::PubAttribs);
        let _ = list.num_dec_members();
    }

    #[test]
    #[should_panic(expected = "read before count_documentation_members")]
    fn reading_documentation_counts_before_computing_panics() {
        let list = MemberList::new(MemberListKind::PubAttribs);
        let _ = list.num_doc_members();
    }

    #[test]
    fn group_and_file_flags_do_not_affect_ordering() {
        let (arena, ids) = arena_with(&["b", "a"]);
        let mut list = MemberList::new(MemberListKind::Related);
        for id in ids {
            list.push_back(id);
        }
        list.set_in_group(true);
        list.set_in_file(true);
        list.add_member_group(MemberGroup {
            title: "Accessors".to_string(),
        });

        list.sort(&arena);

        assert!(list.in_group());
        assert!(list.in_file());
        assert_eq!(list.member_groups().len(), 1);
        assert_eq!(names_of(&list, &arena), vec!["a", "b"]);
    }

    #[test]
    fn registry_returns_the_same_list_for_a_category() {
        let mut lists = MemberLists::new();

        let first = lists.get(MemberListKind::PubMethods) as *const MemberList;
        let second = lists.get(MemberListKind::PubMethods) as *const MemberList;

        assert_eq!(first, second);
        assert_eq!(lists.len(), 1);
    }

    #[test]
    fn registry_iterates_in_first_request_order() {
        let mut lists = MemberLists::new();
        lists.get(MemberListKind::Typedefs);
        lists.get(MemberListKind::PubMethods);
        lists.get(MemberListKind::Enums);
        // lookups on existing categories must not reorder anything
        lists.get(MemberListKind::PubMethods);
        lists.get(MemberListKind::Typedefs);

        let order: Vec<_> = lists.iter().map(|list| list.kind()).collect();
        assert_eq!(
            order,
            vec![
                MemberListKind::Typedefs,
                MemberListKind::PubMethods,
                MemberListKind::Enums
            ]
        );
    }

    #[test]
    fn declaration_counts_cross_check_over_a_registry() {
        let mut arena = MemberArena::new();
        let mut lists = MemberLists::new();

        let spread = [
            (MemberListKind::PubMethods, "open", true),
            (MemberListKind::PubMethods, "close", false),
            (MemberListKind::Variables, "cursor", true),
            (MemberListKind::Typedefs, "Handle", true),
            (MemberListKind::Typedefs, "Hidden", false),
        ];
        for (kind, name, visible) in spread {
            let member =
                Member::new(name, MemberKind::Function).with_visibility(visible, false);
            let id = arena.alloc(member);
            lists.get(kind).push_back(id);
        }

        let visible_total = arena
            .iter()
            .filter(|(_, member)| member.is_declaration_visible())
            .count();

        let mut summed = 0;
        let kinds: Vec<_> = lists.iter().map(|list| list.kind()).collect();
        for kind in kinds {
            let list = lists.get(kind);
            list.count_declaration_members(&arena);
            summed += list.num_dec_members();
        }

        assert_eq!(summed, visible_total);
    }
}

#[cfg(test)]
mod member_api_tests {
    use crate::members::{
        Member, MemberArena, MemberKind, MemberList, MemberListKind, MemberLists, Protection,
    };

    #[test]
    fn less_than_agrees_with_the_comparator() {
        let mut arena = MemberArena::new();
        let alpha = arena.alloc(Member::new("alpha", MemberKind::Function));
        let beta = arena.alloc(Member::new("beta", MemberKind::Function));

        assert!(MemberList::less_than(&arena, alpha, beta));
        assert!(!MemberList::less_than(&arena, beta, alpha));
    }

    #[test]
    fn find_only_sees_created_categories() {
        let mut lists = MemberLists::new();
        lists.get(MemberListKind::StaticAttribs);

        assert!(lists.find(MemberListKind::StaticAttribs).is_some());
        assert!(lists.find(MemberListKind::Enums).is_none());
        assert!(!lists.is_empty());
    }

    #[test]
    fn callers_can_vouch_for_append_order() {
        let mut arena = MemberArena::new();
        let a = arena.alloc(Member::new("a", MemberKind::Variable));
        let b = arena.alloc(Member::new("b", MemberKind::Variable));

        let mut list = MemberList::new(MemberListKind::Variables);
        list.push_back(a);
        list.push_back(b);
        assert!(list.needs_sorting());

        // the caller appended in comparator order already
        list.set_needs_sorting(false);
        assert!(!list.needs_sorting());
    }

    #[test]
    fn member_accessors_expose_the_collected_facts() {
        let member = Member::new("instance", MemberKind::Variable)
            .with_protection(Protection::Protected)
            .with_static(true);

        assert_eq!(member.name(), "instance");
        assert_eq!(member.kind(), MemberKind::Variable);
        assert_eq!(member.protection(), Protection::Protected);
        assert!(member.is_static());
        assert!(!member.is_anonymous());
    }
}
