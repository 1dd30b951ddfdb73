use std::fmt;

/// Kind and name declared at the top of a Delphi source file.
///
/// Only the parser builds a `File`, and only once the whole skeleton
/// has matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    kind: FileKind,
    name: String,
}

impl File {
    pub(crate) const fn new(kind: FileKind, name: String) -> Self {
        Self { kind, name }
    }

    #[must_use]
    pub const fn kind(&self) -> FileKind {
        self.kind
    }

    /// Declared name, spelled as in the source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Structural category a source file declares itself as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `program`, in `.dpr` files.
    Program,
    /// `library`, also in `.dpr` files.
    Library,
    /// `unit`, in `.pas` files.
    Unit,
    /// `package`, in `.dpk` files.
    Package,
}

impl FileKind {
    /// Every kind, in keyword dispatch order.
    pub const ALL: [Self; 4] = [Self::Program, Self::Library, Self::Unit, Self::Package];

    /// Lowercase keyword that opens a file of this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Library => "library",
            Self::Unit => "unit",
            Self::Package => "package",
        }
    }

    /// Extension (without the dot) of files of this kind.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Program | Self::Library => "dpr",
            Self::Unit => "pas",
            Self::Package => "dpk",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
