/// Column definition from a binary table result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Declared type byte from the column header. The server sends one per
    /// column but every cell still travels as a string, so the decoder
    /// carries it through without interpreting it.
    pub type_tag: u8,
}

impl Column {
    pub fn new(name: String, type_tag: u8) -> Self {
        Self { name, type_tag }
    }
}
