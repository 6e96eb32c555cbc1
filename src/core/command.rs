use std::fmt;
use std::str::FromStr;

/// The four stored command slots of an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl CommandKind {
    pub const ALL: [Self; 4] = [Self::Select, Self::Insert, Self::Update, Self::Delete];

    /// Only `Select` produces a result set.
    #[must_use]
    pub const fn is_query(self) -> bool {
        matches!(self, Self::Select)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(Self::Select),
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown command kind '{other}'")),
        }
    }
}

/// Template storage, one optional SQL string per `CommandKind`.
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    slots: [Option<String>; 4],
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `sql` in the slot, returning the template it replaced.
    pub fn set(&mut self, kind: CommandKind, sql: String) -> Option<String> {
        self.slots[kind.index()].replace(sql)
    }

    pub fn get(&self, kind: CommandKind) -> Option<&str> {
        self.slots[kind.index()].as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommandKind, Option<&str>)> {
        CommandKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}
