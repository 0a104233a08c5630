//! Source-level accessibility of types and members.

use strum::{AsRefStr, Display, EnumIter};

use crate::metadata::flags::{FieldAccessFlags, MethodAccessFlags, TypeVisibility};

/// The C# access modifier a type or member is declared with.
///
/// Variants are ordered from least to most visible, so `max` picks the more visible of two
/// accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter)]
pub enum Accessor {
    /// Visible inside the declaring type only
    #[strum(to_string = "private")]
    Private,
    /// Visible to derived types within the same assembly
    #[strum(to_string = "private protected")]
    PrivateProtected,
    /// Visible within the same assembly
    #[strum(to_string = "internal")]
    Internal,
    /// Visible to derived types
    #[strum(to_string = "protected")]
    Protected,
    /// Visible to derived types and within the same assembly
    #[strum(to_string = "protected internal")]
    ProtectedInternal,
    /// Visible everywhere
    #[strum(to_string = "public")]
    Public,
}

impl Accessor {
    /// Accessibility of a (possibly nested) type
    #[must_use]
    pub fn from_type(visibility: TypeVisibility) -> Self {
        match visibility {
            TypeVisibility::PUBLIC | TypeVisibility::NESTED_PUBLIC => Accessor::Public,
            TypeVisibility::NESTED_PRIVATE => Accessor::Private,
            TypeVisibility::NESTED_FAMILY => Accessor::Protected,
            TypeVisibility::NESTED_FAM_AND_ASSEM => Accessor::PrivateProtected,
            TypeVisibility::NESTED_FAM_OR_ASSEM => Accessor::ProtectedInternal,
            _ => Accessor::Internal,
        }
    }

    /// Accessibility of a method
    #[must_use]
    pub fn from_method(access: MethodAccessFlags) -> Self {
        match access {
            MethodAccessFlags::PUBLIC => Accessor::Public,
            MethodAccessFlags::FAMILY => Accessor::Protected,
            MethodAccessFlags::FAM_OR_ASSEM => Accessor::ProtectedInternal,
            MethodAccessFlags::ASSEM => Accessor::Internal,
            MethodAccessFlags::FAM_AND_ASSEM => Accessor::PrivateProtected,
            _ => Accessor::Private,
        }
    }

    /// Accessibility of a field
    #[must_use]
    pub fn from_field(access: FieldAccessFlags) -> Self {
        match access {
            FieldAccessFlags::PUBLIC => Accessor::Public,
            FieldAccessFlags::FAMILY => Accessor::Protected,
            FieldAccessFlags::FAM_OR_ASSEM => Accessor::ProtectedInternal,
            FieldAccessFlags::ASSEMBLY => Accessor::Internal,
            FieldAccessFlags::FAM_AND_ASSEM => Accessor::PrivateProtected,
            _ => Accessor::Private,
        }
    }

    /// Returns true if code outside the assembly can see the declaration
    #[must_use]
    pub fn is_externally_visible(self) -> bool {
        matches!(
            self,
            Accessor::Public | Accessor::Protected | Accessor::ProtectedInternal
        )
    }

    /// Returns true if the declaration is hidden when private members are ignored
    #[must_use]
    pub fn is_hidden(self, ignore_private: bool) -> bool {
        ignore_private && !self.is_externally_visible()
    }

    /// Numeric visibility level, `0` when the declaration is hidden
    #[must_use]
    pub fn visible_rank(self, ignore_private: bool) -> u8 {
        if self.is_hidden(ignore_private) {
            0
        } else {
            self as u8 + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Accessor::PrivateProtected.to_string(), "private protected");
        assert_eq!(Accessor::ProtectedInternal.as_ref(), "protected internal");
        assert_eq!(Accessor::Public.to_string(), "public");
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(Accessor::from_type(TypeVisibility::NOT_PUBLIC), Accessor::Internal);
        assert_eq!(Accessor::from_type(TypeVisibility::NESTED_PUBLIC), Accessor::Public);
        assert_eq!(Accessor::from_method(MethodAccessFlags::FAMILY), Accessor::Protected);
        assert_eq!(
            Accessor::from_method(MethodAccessFlags::COMPILER_CONTROLLED),
            Accessor::Private
        );
        assert_eq!(Accessor::from_field(FieldAccessFlags::ASSEMBLY), Accessor::Internal);
    }

    #[test]
    fn test_ranks() {
        let visible: Vec<Accessor> = Accessor::iter()
            .filter(|accessor| accessor.visible_rank(true) > 0)
            .collect();
        assert_eq!(
            visible,
            vec![Accessor::Protected, Accessor::ProtectedInternal, Accessor::Public]
        );

        assert!(Accessor::iter().all(|accessor| accessor.visible_rank(false) > 0));
        assert_eq!(Accessor::Public.max(Accessor::Private), Accessor::Public);
    }
}
