//! Interaction flags tracked per participant.

/// User-interaction flags for a leaf or composite.
///
/// All flags start false. For composites, `dirty` is true when any live
/// member is dirty, `prefilled` when every live member is prefilled (a
/// memberless composite is not prefilled), and `touched` when focus has
/// left the subtree after being inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// The value has been changed since creation or the last reset.
    pub dirty: bool,
    /// Focus has entered and then left this participant.
    pub touched: bool,
    /// The participant already held a non-empty value at rest.
    pub prefilled: bool,
    /// The surrounding form has been submitted.
    pub submitted: bool,
}

impl InteractionState {
    /// Whether validation feedback should currently be surfaced.
    ///
    /// Feedback is shown once the user has finished interacting
    /// (`touched && dirty`), or when the value was prefilled, or after
    /// a submit attempt.
    pub fn feedback_gate(&self) -> bool {
        (self.touched && self.dirty) || self.prefilled || self.submitted
    }

    /// Reset to the at-rest state, keeping only `prefilled` as given.
    pub fn reset(&mut self, prefilled: bool) {
        *self = Self {
            prefilled,
            ..Self::default()
        };
    }
}
