//! Effects - side effects declared by the reducer

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the dataset from `primary`, falling back to `fallback`
    LoadCatalog { primary: String, fallback: String },
}
