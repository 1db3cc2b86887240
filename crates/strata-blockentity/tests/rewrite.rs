use std::sync::Arc;

use serde_json::json;
use strata_blockentity::{BlockEntityRewriter, DEFAULT_ITEM, ItemMappings};
use strata_nbt::{CompoundTag, Tag};

fn tree(value: serde_json::Value) -> CompoundTag {
    serde_json::from_value(value).expect("valid tag tree")
}

fn rewriter_from_file() -> BlockEntityRewriter {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"{
          "minecraft:archer_pottery_sherd": "minecraft:archer_pottery_sherd",
          "minecraft:prize_pottery_sherd": "minecraft:prize_pottery_sherd",
          "minecraft:emerald": "minecraft:emerald"
        }"#,
    )
    .unwrap();
    BlockEntityRewriter::new(ItemMappings::load(&path).expect("mappings load"))
}

#[test]
fn decorated_pot_with_unknown_sherd_never_fails() {
    let rewriter = rewriter_from_file();
    let source = tree(json!({
        "id": {"string": "DecoratedPot"},
        "sherds": {"list": [
            {"string": "minecraft:archer_pottery_sherd"},
            {"string": "minecraft:future_pottery_sherd"},
            {"string": ""},
            {"string": "minecraft:prize_pottery_sherd"}
        ]},
        "item": {"compound": {
            "Name": {"string": "minecraft:ruby"},
            "Count": {"byte": 1},
            "Damage": {"short": 0}
        }},
        "LootTableSeed": {"int": 9}
    }));

    let target = rewriter.rewrite("DecoratedPot", &source).expect("pot is supported");

    assert_eq!(
        target.get_string_list("sherds"),
        Some(vec![
            "minecraft:archer_pottery_sherd",
            "minecraft:brick",
            "minecraft:brick",
            "minecraft:prize_pottery_sherd",
        ])
    );
    assert_eq!(
        target.get_compound("item").and_then(|item| item.get_string("id")),
        Some(DEFAULT_ITEM)
    );
    assert_eq!(target.get_int("LootTableSeed"), Some(9));
    assert!(!target.contains("id"));
}

#[test]
fn end_gateway_tree_from_json() {
    let rewriter = BlockEntityRewriter::default();
    let source = tree(json!({
        "Age": {"int": 200},
        "ExitPortal": {"list": [{"int": 1}, {"int": 70}, {"int": 1}]}
    }));
    let target = rewriter.rewrite("EndGateway", &source).unwrap();
    assert_eq!(
        serde_json::to_value(&target).unwrap(),
        json!({"Age": {"long": 200}, "exit_portal": {"int_array": [1, 70, 1]}})
    );
    assert_eq!(target.get("Age"), Some(&Tag::Long(200)));
}

#[test]
fn rewriter_is_shareable_across_threads() {
    let rewriter = Arc::new(rewriter_from_file());
    let handles: Vec<_> = (0..4)
        .map(|signal| {
            let rewriter = Arc::clone(&rewriter);
            std::thread::spawn(move || {
                let mut source = CompoundTag::new();
                source.put_int("OutputSignal", signal);
                rewriter
                    .rewrite("Comparator", &source)
                    .and_then(|target| target.get_int("OutputSignal"))
            })
        })
        .collect();
    let signals: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(signals, vec![Some(0), Some(1), Some(2), Some(3)]);
}
