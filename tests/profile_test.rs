//! Profiles and dictionaries loaded from disk.

use loot_filter_engine::{
    load_profile, Comparison, Dictionaries, ItemType, ProfileError, ProfileSet, ProfileStore,
    SigilPriority,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "affixes.json",
        r#"{
            "critical_strike_chance": "Critical Strike Chance",
            "maximum_life": "Maximum Life",
            "movement_speed": "Movement Speed"
        }"#,
    );
    write(
        dir.path(),
        "uniques.json",
        r#"{"galvanic_azurite": {"desc": "Lightning damage", "num_inherents": 2}}"#,
    );
    write(
        dir.path(),
        "aspects.json",
        r#"{"of_disobedience": "of Disobedience"}"#,
    );
    write(
        dir.path(),
        "sigils.json",
        r#"{"dungeons": {"ancient_reservoir": "Ancient Reservoir"}, "minor": {"cold_resist": "Cold Resist"}}"#,
    );
    write(
        dir.path(),
        "tributes.json",
        r#"{"tribute_of_pride": "Tribute of Pride"}"#,
    );
    dir
}

const SORC: &str = r#"
Affixes:
  - Boots:
      itemType: [boots]
      minPower: 725
      minGreaterAffixCount: 1
      affixPool:
        - count:
            - {name: movement_speed, greater: true}
            - [maximum_life, 1000]
          minCount: 1
      inherentPool:
        - count: [critical_strike_chance]
AspectUpgrades: [of_disobedience]
Sigils:
  whitelist: [ancient_reservoir]
  blacklist: [cold_resist]
  priority: blacklist
Tributes: [pride]
Uniques:
  - aspect: [galvanic_azurite, 40]
    minPercentOfAspect: 75
"#;

#[test]
fn test_load_profile_from_disk() {
    let dir = data_dir();
    let dictionaries = Dictionaries::from_dir(dir.path()).unwrap();
    write(dir.path(), "sorc.yaml", SORC);
    let source = fs::read_to_string(dir.path().join("sorc.yaml")).unwrap();

    let profile = load_profile("sorc", &source, &dictionaries).unwrap();
    assert_eq!(profile.name, "sorc");

    let boots = &profile.affix_filters[0];
    assert_eq!(boots.name, "Boots");
    assert_eq!(boots.item_types, vec![ItemType::Boots]);
    assert_eq!(boots.min_power, 725);
    assert_eq!(boots.min_greater_affix_count, 1);
    assert_eq!(boots.affix_pools[0].min_count, 1);
    assert!(boots.affix_pools[0].requirements[0].want_greater);
    assert_eq!(
        boots.affix_pools[0].requirements[1].comparison,
        Comparison::Larger
    );
    assert_eq!(boots.inherent_pools[0].min_count, 1);

    assert_eq!(profile.aspect_upgrades, vec!["of_disobedience".to_string()]);

    let sigils = profile.sigils.as_ref().unwrap();
    assert_eq!(sigils.priority, SigilPriority::Blacklist);
    assert_eq!(sigils.whitelist.len(), 1);

    assert_eq!(profile.tributes[0].name.as_deref(), Some("tribute_of_pride"));
    assert_eq!(profile.uniques[0].min_percent_of_aspect, 75);
}

#[test]
fn test_profile_names_follow_dictionaries() {
    let dir = data_dir();
    let dictionaries = Dictionaries::from_dir(dir.path()).unwrap();

    let err = load_profile("stale", "AspectUpgrades: [of_anger]\n", &dictionaries).unwrap_err();
    assert!(matches!(err, ProfileError::UnknownName { .. }));
    assert_eq!(err.profile(), "stale");

    // Adding the aspect to the data files makes the same profile valid
    write(
        dir.path(),
        "aspects.json",
        r#"{"of_disobedience": "of Disobedience", "of_anger": "of Anger"}"#,
    );
    let refreshed = Dictionaries::from_dir(dir.path()).unwrap();
    assert!(load_profile("stale", "AspectUpgrades: [of_anger]\n", &refreshed).is_ok());
}

#[test]
fn test_store_swaps_whole_sets() {
    let dir = data_dir();
    let dictionaries = Dictionaries::from_dir(dir.path()).unwrap();
    let (first, errors) =
        ProfileSet::from_documents([("sorc", SORC), ("empty", "")], &dictionaries);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].profile(), "empty");

    let store = ProfileStore::new(first);
    let before = store.snapshot();
    assert_eq!(before.len(), 1);

    let (second, _) = ProfileSet::from_documents(
        [("a", "Tributes: [legendary]\n"), ("b", "AspectUpgrades: []\n")],
        &dictionaries,
    );
    store.replace(second);

    // Readers holding the old snapshot keep a consistent view
    assert_eq!(before.profiles()[0].name, "sorc");
    let after = store.snapshot();
    let names: Vec<_> = after.profiles().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}
