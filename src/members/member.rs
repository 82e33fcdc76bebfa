//! Member entities and the arena that owns them.
//!
//! The symbol table owns every member; everything else (member lists,
//! groups) refers to a member through its [`MemberId`] handle, so a list
//! can never outlive or double-free the entity it orders.

/// Handle to a member stored in a [`MemberArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(usize);

/// What kind of entity a member is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    Define,
    Function,
    Variable,
    Typedef,
    Enum,
    EnumValue,
    Property,
    Related,
}

/// Member protection level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Protection {
    Public,
    Protected,
    Private,
}

/// A documented symbol entity.
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    kind: MemberKind,
    protection: Protection,
    is_static: bool,
    brief_visible: bool,
    detail_visible: bool,
    enum_values: Vec<MemberId>,
}

impl Member {
    /// A public, declaration-visible member with no detailed docs.
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            protection: Protection::Public,
            is_static: false,
            brief_visible: true,
            detail_visible: false,
            enum_values: Vec::new(),
        }
    }

    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Sets the per-section visibility flags.
    pub fn with_visibility(mut self, brief: bool, detail: bool) -> Self {
        self.brief_visible = brief;
        self.detail_visible = detail;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn protection(&self) -> Protection {
        self.protection
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Shown in the brief/declaration section of its page.
    pub fn is_declaration_visible(&self) -> bool {
        self.brief_visible
    }

    /// Has a block in the detailed documentation section.
    pub fn is_documentation_visible(&self) -> bool {
        self.detail_visible
    }

    /// Anonymous members carry the parser's `@` name prefix.
    pub fn is_anonymous(&self) -> bool {
        self.name.starts_with('@')
    }

    /// Values nested under this member when it is an enum.
    pub fn enum_values(&self) -> &[MemberId] {
        &self.enum_values
    }

    pub fn add_enum_value(&mut self, value: MemberId) {
        self.enum_values.push(value);
    }
}

/// Owns every member of a scope.
#[derive(Debug, Default)]
pub struct MemberArena {
    members: Vec<Member>,
}

impl MemberArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, member: Member) -> MemberId {
        self.members.push(member);
        MemberId(self.members.len() - 1)
    }

    pub fn get(&self, id: MemberId) -> &Member {
        &self.members[id.0]
    }

    pub fn get_mut(&mut self, id: MemberId) -> &mut Member {
        &mut self.members[id.0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &Member)> {
        self.members
            .iter()
            .enumerate()
            .map(|(index, member)| (MemberId(index), member))
    }
}
