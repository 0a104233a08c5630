/// Configuration for inspecting types.
///
/// The options travel explicitly through every entry point of the engine; nothing is kept in
/// process-wide state, so inspections with different options can run side by side.
///
/// # Examples
///
/// ```rust
/// use docscope::InspectionOptions;
///
/// let options = InspectionOptions::complete();
/// assert!(!options.ignore_private);
/// assert!(options.include_inherited);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectionOptions {
    /// Hide types and members that are not visible outside their assembly
    /// (`private`, `internal`, `private protected`)
    pub ignore_private: bool,

    /// Walk the base-type chain and include inherited members
    pub include_inherited: bool,

    /// Maximum number of base types walked before the chain is considered cyclic (default: 64)
    pub max_inheritance_depth: usize,
}

impl Default for InspectionOptions {
    fn default() -> Self {
        Self {
            ignore_private: true,
            include_inherited: true,
            max_inheritance_depth: 64,
        }
    }
}

impl InspectionOptions {
    /// The public surface of a library, inherited members included
    #[must_use]
    pub fn public_api() -> Self {
        Self::default()
    }

    /// Every declaration, whatever its visibility
    #[must_use]
    pub fn complete() -> Self {
        Self {
            ignore_private: false,
            ..Self::default()
        }
    }

    /// The public members a type declares itself, without walking its base types
    #[must_use]
    pub fn declared_only() -> Self {
        Self {
            include_inherited: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(InspectionOptions::public_api(), InspectionOptions::default());

        let complete = InspectionOptions::complete();
        assert!(!complete.ignore_private);
        assert_eq!(complete.max_inheritance_depth, 64);

        let declared = InspectionOptions::declared_only();
        assert!(declared.ignore_private);
        assert!(!declared.include_inherited);
    }
}
