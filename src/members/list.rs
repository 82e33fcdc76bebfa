//! Ordered member lists, their category registry and the generic comparator.
//!
//! Lists are populated during a single-threaded collection phase and only
//! read by render passes after that phase has fully finished (sorting and
//! count computation included). That phase separation is the concurrency
//! contract; there are no locks here.

use std::cmp::Ordering;

use super::member::{Member, MemberArena, MemberId, MemberKind};

/// Semantic category of a member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberListKind {
    PubMethods,
    ProMethods,
    PriMethods,
    StaticMethods,
    PubAttribs,
    ProAttribs,
    PriAttribs,
    StaticAttribs,
    Typedefs,
    Enums,
    EnumValues,
    Functions,
    Variables,
    Related,
}

impl MemberListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberListKind::PubMethods => "public-methods",
            MemberListKind::ProMethods => "protected-methods",
            MemberListKind::PriMethods => "private-methods",
            MemberListKind::StaticMethods => "static-methods",
            MemberListKind::PubAttribs => "public-attributes",
            MemberListKind::ProAttribs => "protected-attributes",
            MemberListKind::PriAttribs => "private-attributes",
            MemberListKind::StaticAttribs => "static-attributes",
            MemberListKind::Typedefs => "typedefs",
            MemberListKind::Enums => "enums",
            MemberListKind::EnumValues => "enum-values",
            MemberListKind::Functions => "functions",
            MemberListKind::Variables => "variables",
            MemberListKind::Related => "related",
        }
    }
}

/// The total order used to sort members within a list.
///
/// Case-insensitive name first, then kind and protection as tie-breaks,
/// and the case-sensitive name last so equal-looking members still order
/// deterministically across runs. Output file layout depends on this
/// being stable for a given input set.
pub fn generic_compare_members(a: &Member, b: &Member) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.kind().cmp(&b.kind()))
        .then_with(|| a.protection().cmp(&b.protection()))
        .then_with(|| a.name().cmp(b.name()))
}

/// Aggregate counts over one section of a rendered page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionCounts {
    pub members: usize,
    /// Enum values nest under their enum and are tallied separately.
    pub enum_values: usize,
}

/// A named sub-heading grouping members inside a list.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberGroup {
    pub title: String,
}

/// An ordered list of member references for one category.
///
/// The list does not own its members; it holds arena handles. Counts are
/// unset until the corresponding `count_*` pass runs; reading one earlier
/// is a programmer error and panics with the offending category.
#[derive(Debug)]
pub struct MemberList {
    kind: MemberListKind,
    members: Vec<MemberId>,
    dec_counts: Option<SectionCounts>,
    doc_counts: Option<SectionCounts>,
    needs_sorting: bool,
    groups: Vec<MemberGroup>,
    in_group: bool,
    in_file: bool,
}

impl MemberList {
    pub fn new(kind: MemberListKind) -> Self {
        Self {
            kind,
            members: Vec::new(),
            dec_counts: None,
            doc_counts: None,
            needs_sorting: false,
            groups: Vec::new(),
            in_group: false,
            in_file: false,
        }
    }

    pub fn kind(&self) -> MemberListKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.iter().copied()
    }

    /// Appends without sorting and marks the list unsorted.
    pub fn push_back(&mut self, id: MemberId) {
        self.members.push(id);
        self.needs_sorting = true;
    }

    /// Inserts at the comparator's position, keeping a sorted list sorted
    /// without a full re-sort (and without flipping `needs_sorting`).
    pub fn insert_sorted(&mut self, arena: &MemberArena, id: MemberId) {
        let new = arena.get(id);
        let position = self
            .members
            .partition_point(|&m| generic_compare_members(arena.get(m), new) != Ordering::Greater);
        self.members.insert(position, id);
    }

    /// Stable sort by the generic comparator. Idempotent.
    pub fn sort(&mut self, arena: &MemberArena) {
        self.members
            .sort_by(|&a, &b| generic_compare_members(arena.get(a), arena.get(b)));
        self.needs_sorting = false;
    }

    pub fn less_than(arena: &MemberArena, a: MemberId, b: MemberId) -> bool {
        generic_compare_members(arena.get(a), arena.get(b)) == Ordering::Less
    }

    /// Identity-based removal; absence is a no-op.
    pub fn remove(&mut self, id: MemberId) {
        if let Some(position) = self.members.iter().position(|&m| m == id) {
            self.members.remove(position);
        }
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.iter().any(|&m| m == id)
    }

    pub fn needs_sorting(&self) -> bool {
        self.needs_sorting
    }

    pub fn set_needs_sorting(&mut self, needs_sorting: bool) {
        self.needs_sorting = needs_sorting;
    }

    /// One pass classifying every member for the declaration section.
    /// Safe to call again; later calls keep the first result.
    pub fn count_declaration_members(&mut self, arena: &MemberArena) {
        if self.dec_counts.is_some() {
            return;
        }
        let mut counts = SectionCounts::default();
        for &id in &self.members {
            let member = arena.get(id);
            if member.is_declaration_visible() {
                counts.members += 1;
                if member.kind() == MemberKind::EnumValue {
                    counts.enum_values += 1;
                }
            } else if member.kind() == MemberKind::Enum && member.is_anonymous() {
                // a hidden anonymous enum still surfaces its visible
                // values standalone
                let visible = member
                    .enum_values()
                    .iter()
                    .filter(|&&value| arena.get(value).is_declaration_visible())
                    .count();
                counts.members += visible;
                counts.enum_values += visible;
            }
        }
        self.dec_counts = Some(counts);
    }

    /// One pass classifying every member for the documentation section.
    pub fn count_documentation_members(&mut self, arena: &MemberArena) {
        if self.doc_counts.is_some() {
            return;
        }
        let mut counts = SectionCounts::default();
        for &id in &self.members {
            let member = arena.get(id);
            if member.is_documentation_visible() {
                counts.members += 1;
                if member.kind() == MemberKind::EnumValue {
                    counts.enum_values += 1;
                }
            } else if member.kind() == MemberKind::Enum && member.is_anonymous() {
                let visible = member
                    .enum_values()
                    .iter()
                    .filter(|&&value| arena.get(value).is_documentation_visible())
                    .count();
                counts.members += visible;
                counts.enum_values += visible;
            }
        }
        self.doc_counts = Some(counts);
    }

    pub fn num_dec_members(&self) -> usize {
        self.dec_counts
            .unwrap_or_else(|| {
                panic!(
                    "declaration counts of {} read before count_declaration_members ran",
                    self.kind.as_str()
                )
            })
            .members
    }

    pub fn num_dec_enum_values(&self) -> usize {
        self.dec_counts
            .unwrap_or_else(|| {
                panic!(
                    "declaration counts of {} read before count_declaration_members ran",
                    self.kind.as_str()
                )
            })
            .enum_values
    }

    pub fn num_doc_members(&self) -> usize {
        self.doc_counts
            .unwrap_or_else(|| {
                panic!(
                    "documentation counts of {} read before count_documentation_members ran",
                    self.kind.as_str()
                )
            })
            .members
    }

    pub fn num_doc_enum_values(&self) -> usize {
        self.doc_counts
            .unwrap_or_else(|| {
                panic!(
                    "documentation counts of {} read before count_documentation_members ran",
                    self.kind.as_str()
                )
            })
            .enum_values
    }

    pub fn add_member_group(&mut self, group: MemberGroup) {
        self.groups.push(group);
    }

    pub fn member_groups(&self) -> &[MemberGroup] {
        &self.groups
    }

    /// Whether this list renders inside a type-level grouping construct.
    pub fn set_in_group(&mut self, in_group: bool) {
        self.in_group = in_group;
    }

    pub fn in_group(&self) -> bool {
        self.in_group
    }

    /// Whether this list renders as part of a file-level listing.
    pub fn set_in_file(&mut self, in_file: bool) {
        self.in_file = in_file;
    }

    pub fn in_file(&self) -> bool {
        self.in_file
    }
}

/// One member list per category, created on first request.
///
/// Iteration order is the order categories were first asked for, and
/// lookups never reorder entries; downstream section ordering depends
/// on that.
#[derive(Debug, Default)]
pub struct MemberLists {
    lists: Vec<MemberList>,
}

impl MemberLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the list for `kind`, creating an empty one on first access.
    pub fn get(&mut self, kind: MemberListKind) -> &mut MemberList {
        if let Some(index) = self.lists.iter().position(|list| list.kind() == kind) {
            return &mut self.lists[index];
        }
        self.lists.push(MemberList::new(kind));
        let last = self.lists.len() - 1;
        &mut self.lists[last]
    }

    pub fn find(&self, kind: MemberListKind) -> Option<&MemberList> {
        self.lists.iter().find(|list| list.kind() == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberList> {
        self.lists.iter()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
