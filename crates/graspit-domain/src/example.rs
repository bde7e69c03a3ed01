//! Labeled genitive pairs - the unit of training and evaluation

/// A genitive pair ("A de B") together with its semantic-relation label.
///
/// Produced by the corpus layer, consumed by training and evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPair {
    /// The head term (A in "A de B")
    pub head: String,

    /// The complement term (B in "A de B"), raw surface text including any
    /// determiner
    pub complement: String,

    /// The relation-type label
    pub relation: String,
}

impl LabeledPair {
    /// Create a labeled pair
    pub fn new(
        head: impl Into<String>,
        complement: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            complement: complement.into(),
            relation: relation.into(),
        }
    }
}
