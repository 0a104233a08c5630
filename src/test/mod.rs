//! Fixtures shared by the unit tests.
//!
//! [`class_library`] describes a small game assembly that covers the situations the inspector
//! has to handle: a generic base closed by a derived class, an abstract base with private and
//! protected state, overrides, static members, operators, hidden types and a nested type.

use crate::metadata::{
    builder::{
        EventDefBuilder, FieldDefBuilder, GenericParamBuilder, MethodDefBuilder, ParamDefBuilder,
        PropertyDefBuilder, TypeDefBuilder,
    },
    flags::{
        FieldAccessFlags, GenericParamAttributes, MethodAccessFlags, MethodModifiers,
        MethodVtableFlags, TypeAttributes,
    },
    signature::{PrimitiveKind, TypeName, TypeSig},
    source::MetadataStore,
};

/// `System.Collections.Generic.List<arg>`
pub fn list_of(arg: TypeSig) -> TypeSig {
    TypeSig::generic_inst(
        TypeSig::named("System.Collections.Generic", "List`1"),
        vec![arg],
    )
}

/// The `Game` class library:
///
/// ```csharp
/// public class Container<T> where T : new() {
///     public T Get(int index);
///     public void Set(T item);
/// }
/// public class IntContainer : Container<int> { }
///
/// internal interface IInternalState { }
/// public abstract class Character : IInternalState {
///     private int secret;
///     protected int armor;
///     protected Character(string name);
///     public string Name { get; private set; }
///     public event EventHandler Died;
///     public virtual void Attack();
/// }
/// public sealed class Knight : Character, IDisposable {
///     private string oath;
///     public Knight(string name);
///     public override void Attack();
///     public void Dispose();
///     public static Knight Recruit();
///     public static bool operator ==(Knight left, Knight right);
/// }
///
/// internal class Internals { public void Run(); }
/// public class Inventory { public class Slot { public int Index; } }
/// ```
pub fn class_library() -> MetadataStore {
    let string: TypeSig = PrimitiveKind::String.into();
    let int: TypeSig = PrimitiveKind::I4.into();
    let knight = TypeSig::named("Game", "Knight");

    let container = TypeDefBuilder::class("Game", "Container`1")
        .assembly("Game")
        .generic_param(
            GenericParamBuilder::new("T").flags(GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT),
        )
        .method(MethodDefBuilder::constructor())
        .method(
            MethodDefBuilder::new("Get")
                .returns(TypeSig::type_param(0, "T"))
                .param(ParamDefBuilder::new("index", int.clone())),
        )
        .method(
            MethodDefBuilder::new("Set")
                .param(ParamDefBuilder::new("item", TypeSig::type_param(0, "T"))),
        );

    let int_container = TypeDefBuilder::class("Game", "IntContainer")
        .assembly("Game")
        .extends(TypeSig::generic_inst(
            TypeSig::named("Game", "Container`1"),
            vec![int.clone()],
        ))
        .method(MethodDefBuilder::constructor());

    let internal_state = TypeDefBuilder::interface("Game", "IInternalState")
        .assembly("Game")
        .internal();

    let character = TypeDefBuilder::class("Game", "Character")
        .assembly("Game")
        .modifiers(TypeAttributes::ABSTRACT)
        .implements(TypeSig::named("Game", "IInternalState"))
        .field(FieldDefBuilder::new("secret", int.clone()).access(FieldAccessFlags::PRIVATE))
        .field(FieldDefBuilder::new("armor", int.clone()).access(FieldAccessFlags::FAMILY))
        .method(
            MethodDefBuilder::constructor()
                .access(MethodAccessFlags::FAMILY)
                .param(ParamDefBuilder::new("name", string.clone())),
        )
        .method(
            MethodDefBuilder::new("Attack")
                .modifiers(MethodModifiers::VIRTUAL)
                .vtable(MethodVtableFlags::NEW_SLOT),
        )
        .property(
            PropertyDefBuilder::new("Name", string.clone())
                .get()
                .setter(MethodDefBuilder::new(String::new()).access(MethodAccessFlags::PRIVATE)),
        )
        .event(EventDefBuilder::new("Died", TypeSig::named("System", "EventHandler")).accessors());

    let knight_type = TypeDefBuilder::class("Game", "Knight")
        .assembly("Game")
        .modifiers(TypeAttributes::SEALED)
        .extends(TypeSig::named("Game", "Character"))
        .implements(TypeSig::named("System", "IDisposable"))
        .field(FieldDefBuilder::new("oath", string.clone()).access(FieldAccessFlags::PRIVATE))
        .method(
            MethodDefBuilder::constructor().param(ParamDefBuilder::new("name", string.clone())),
        )
        .method(MethodDefBuilder::new("Attack").modifiers(MethodModifiers::VIRTUAL))
        .method(
            MethodDefBuilder::new("Dispose")
                .modifiers(MethodModifiers::VIRTUAL | MethodModifiers::FINAL)
                .vtable(MethodVtableFlags::NEW_SLOT),
        )
        .method(
            MethodDefBuilder::new("Recruit")
                .modifiers(MethodModifiers::STATIC)
                .returns(knight.clone()),
        )
        .method(
            MethodDefBuilder::operator("op_Equality")
                .returns(PrimitiveKind::Boolean.into())
                .param(ParamDefBuilder::new("left", knight.clone()))
                .param(ParamDefBuilder::new("right", knight)),
        );

    let internals = TypeDefBuilder::class("Game", "Internals")
        .assembly("Game")
        .internal()
        .method(MethodDefBuilder::new("Run"));

    let inventory = TypeDefBuilder::class("Game", "Inventory").assembly("Game");
    let slot = TypeDefBuilder::class("", "Slot")
        .assembly("Game")
        .nested_in(TypeName::new("Game", "Inventory"))
        .field(FieldDefBuilder::new("Index", int));

    let store = MetadataStore::new();
    for builder in [
        container,
        int_container,
        internal_state,
        character,
        knight_type,
        internals,
        inventory,
        slot,
    ] {
        match builder.build() {
            Ok(definition) => {
                store.insert(definition);
            }
            Err(error) => panic!("invalid fixture: {error}"),
        }
    }
    store
}
