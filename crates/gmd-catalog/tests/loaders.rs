use std::fs;
use std::path::Path;

use gmd_catalog::{
    CatalogError, EXCLUSIONS_FILE, GtDataset, KEYWORDS_FILE, load_catalog, load_catalog_dir,
    load_default_catalog,
};
use gmd_model::{ContextType, SexAssociation};

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_default_catalog() {
    let snapshot = load_default_catalog().expect("load default catalog");
    assert_eq!(snapshot.keywords_for(SexAssociation::Female).count(), 34);
    assert_eq!(snapshot.keywords_for(SexAssociation::Male).count(), 21);
    assert_eq!(
        snapshot
            .keywords_for(SexAssociation::Female)
            .filter(|k| k.pregnancy_related)
            .count(),
        12
    );
    assert_eq!(snapshot.exclusion_count(), 3);
    for context in ContextType::all() {
        assert!(snapshot.is_excluded_context(*context), "{context} enabled");
    }
}

#[test]
fn default_catalog_omits_disabled_keywords() {
    let snapshot = load_default_catalog().expect("load default catalog");
    assert!(
        snapshot.keywords().iter().all(|k| k.text != "breast"),
        "disabled keyword must not reach the snapshot"
    );
    assert!(snapshot.keywords().iter().all(|k| k.enabled));
}

#[test]
fn default_catalog_keeps_literal_punctuation_keywords() {
    let snapshot = load_default_catalog().expect("load default catalog");
    assert!(snapshot.keywords().iter().any(|k| k.text == "o.b."));
    assert!(snapshot.keywords().iter().any(|k| k.text == "g/p"));
}

#[test]
fn loads_catalog_directory() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    write(
        &dir.join(KEYWORDS_FILE),
        "keyword,gender_type,category,subcategory,pregnancy_related,enabled\n\
         ovary,female,body_part,,false,true\n\
         prostate,male,body_part,,false,false\n",
    );
    write(
        &dir.join(EXCLUSIONS_FILE),
        "context_type,enabled\nhealthcare_provider,false\ncommunication,true\n",
    );

    let snapshot = load_catalog_dir(dir).expect("load catalog dir");
    assert_eq!(snapshot.keyword_count(), 1);
    assert_eq!(snapshot.keywords()[0].text, "ovary");
    assert_eq!(snapshot.exclusion_count(), 1);
    assert!(snapshot.is_excluded_context(ContextType::Communication));
    assert!(!snapshot.is_excluded_context(ContextType::HealthcareProvider));

    let via_option = load_catalog(Some(dir)).expect("load catalog");
    assert_eq!(via_option, snapshot);
}

#[test]
fn missing_directory_and_files_are_reported() {
    let missing = tempfile::tempdir().unwrap().path().join("missing");
    assert!(matches!(
        load_catalog_dir(&missing),
        Err(CatalogError::DirectoryNotFound { .. })
    ));

    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    write(
        &dir.join(KEYWORDS_FILE),
        "keyword,gender_type,category\novary,female,body_part\n",
    );
    assert!(matches!(
        load_catalog_dir(dir),
        Err(CatalogError::FileNotFound { .. })
    ));
}

#[test]
fn loads_dataset_file() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    let path = dir.join("gt.csv");
    write(
        &path,
        "id,gender,findings,human_impression\n\
         1,Male,\"Prostate is normal in size.\",\"No acute abnormality.\"\n\
         2,Female,\"Uterus is anteverted.\",\"Normal pelvic ultrasound.\"\n\
         3,Female,,\"Missing findings.\"\n",
    );
    let dataset = GtDataset::load(&path).expect("load dataset");
    assert_eq!(dataset.len(), 2);
    let overview = dataset.overview();
    assert_eq!(overview.genders, vec!["Male", "Female"]);
    assert_eq!(overview.human_impressions[1].value, "Normal pelvic ultrasound.");
}
