//! Integration tests for linking inspected types with a compiler documentation file.

use std::path::PathBuf;

use docscope::prelude::*;

fn documentation() -> Result<DocumentationIndex> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/samples/Game.xml");
    DocumentationIndex::load(&path)
}

/// ```csharp
/// public class Unit {
///     public const int MaxHealth = 100;
///     protected Unit(string name);
///     public int Health { get; set; }
///     public event EventHandler Died;
///     public virtual void Heal(int amount);
/// }
/// public class Hero : Unit {
///     public Hero(string name);
///     public void Equip<TItem>(TItem item, out int slot);
///     public void Taunt();
///     public static explicit operator int(Hero hero);
/// }
/// ```
fn heroes() -> Result<MetadataStore> {
    let string: TypeSig = PrimitiveKind::String.into();
    let int: TypeSig = PrimitiveKind::I4.into();

    Ok(MetadataStore::from_definitions([
        TypeDefBuilder::class("Game", "Unit")
            .assembly("Game")
            .field(FieldDefBuilder::new("MaxHealth", int.clone()).constant(ConstantValue::I4(100)))
            .method(
                MethodDefBuilder::constructor()
                    .access(MethodAccessFlags::FAMILY)
                    .param(ParamDefBuilder::new("name", string.clone())),
            )
            .method(
                MethodDefBuilder::new("Heal")
                    .modifiers(MethodModifiers::VIRTUAL)
                    .vtable(MethodVtableFlags::NEW_SLOT)
                    .param(ParamDefBuilder::new("amount", int.clone())),
            )
            .property(PropertyDefBuilder::new("Health", int.clone()).get().set())
            .event(EventDefBuilder::new("Died", TypeSig::named("System", "EventHandler")).accessors())
            .build()?,
        TypeDefBuilder::class("Game", "Hero")
            .assembly("Game")
            .extends(TypeSig::named("Game", "Unit"))
            .method(MethodDefBuilder::constructor().param(ParamDefBuilder::new("name", string)))
            .method(
                MethodDefBuilder::new("Equip")
                    .generic_param(GenericParamBuilder::new("TItem"))
                    .param(ParamDefBuilder::new("item", TypeSig::method_param(0, "TItem")))
                    .param(ParamDefBuilder::new("slot", int.clone()).out()),
            )
            .method(MethodDefBuilder::new("Taunt"))
            .method(
                MethodDefBuilder::operator("op_Explicit")
                    .returns(int)
                    .param(ParamDefBuilder::new("hero", TypeSig::named("Game", "Hero"))),
            )
            .build()?,
    ]))
}

#[test]
fn test_load_sample() -> Result<()> {
    let index = documentation()?;

    assert_eq!(index.assembly(), "Game");
    assert_eq!(index.len(), 9);
    assert_eq!(
        index.get("T:Game.Hero").map(|entry| entry.summary.as_str()),
        Some("The playable character.")
    );

    Ok(())
}

#[test]
fn test_every_member_finds_its_prose() -> Result<()> {
    let store = heroes()?;
    let index = documentation()?;
    let record = Inspector::new(&store, InspectionOptions::default()).inspect("Game.Hero")?;
    let linked: Vec<LinkedMember<'_>> = Linker::new(&record, &index).iter().collect();

    let summary = |doc_id: &str| {
        linked
            .iter()
            .find(|item| item.doc_id == doc_id)
            .and_then(|item| item.documentation)
            .map(|entry| entry.summary.clone())
    };

    assert_eq!(summary("T:Game.Hero").as_deref(), Some("The playable character."));
    assert_eq!(summary("M:Game.Hero.#ctor(System.String)").as_deref(), Some("Creates a hero."));
    assert_eq!(summary("F:Game.Unit.MaxHealth").as_deref(), Some("Upper bound for <see cref=\"P:Game.Unit.Health\"/>."));
    assert_eq!(summary("P:Game.Unit.Health").as_deref(), Some("Current health."));
    assert_eq!(summary("E:Game.Unit.Died").as_deref(), Some("Raised when health reaches zero."));
    assert_eq!(summary("M:Game.Unit.Heal(System.Int32)").as_deref(), Some("Restores health."));
    assert_eq!(
        summary("M:Game.Hero.Equip``1(``0,System.Int32@)").as_deref(),
        Some("Equips an item into a slot.")
    );
    assert_eq!(
        summary("M:Game.Hero.op_Explicit(Game.Hero)~System.Int32").as_deref(),
        Some("The hero's level.")
    );

    // constructors are never inherited, so the base constructor's entry stays unused
    assert!(linked
        .iter()
        .all(|item| item.doc_id != "M:Game.Unit.#ctor(System.String)"));

    Ok(())
}

#[test]
fn test_declarations_of_linked_members() -> Result<()> {
    let store = heroes()?;
    let index = documentation()?;
    let record = Inspector::new(&store, InspectionOptions::default()).inspect("Game.Hero")?;
    let linker = Linker::new(&record, &index);

    let declaration = |doc_id: &str| {
        linker
            .iter()
            .find(|item| item.doc_id == doc_id)
            .map(|item| item.declaration().to_string())
    };

    assert_eq!(
        declaration("M:Game.Hero.Equip``1(``0,System.Int32@)").as_deref(),
        Some("public void Equip<TItem>(TItem item, out int slot)")
    );
    assert_eq!(
        declaration("M:Game.Hero.op_Explicit(Game.Hero)~System.Int32").as_deref(),
        Some("public static explicit operator int(Hero hero)")
    );
    assert_eq!(
        declaration("F:Game.Unit.MaxHealth").as_deref(),
        Some("public const int MaxHealth = 100")
    );
    assert_eq!(
        declaration("P:Game.Unit.Health").as_deref(),
        Some("public int Health { get; set; }")
    );

    Ok(())
}

#[test]
fn test_undocumented_members() -> Result<()> {
    let store = heroes()?;
    let index = documentation()?;
    let record = Inspector::new(&store, InspectionOptions::default()).inspect("Game.Hero")?;

    let missing: Vec<String> = Linker::new(&record, &index)
        .undocumented()
        .map(|item| item.doc_id)
        .collect();

    assert_eq!(missing, vec!["M:Game.Hero.Taunt".to_string()]);

    Ok(())
}
