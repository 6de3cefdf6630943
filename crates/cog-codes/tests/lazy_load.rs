//! Load-once behaviour of the resolution context.

use std::fs;
use std::path::{Path, PathBuf};

use cog_codes::{CogConfig, CogContext, CogError, Dataset, DoctorReport};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "cog-codes-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn write_fixtures(dir: &Path) {
    write(
        &dir.join("v_region_2025.csv"),
        "REG,CHEFLIEU,TNCC,NCC,NCCENR,LIBELLE
84,69123,1,AUVERGNE RHONE ALPES,Auvergne-Rhône-Alpes,Auvergne-Rhône-Alpes
",
    );
    write(
        &dir.join("v_departement_2025.csv"),
        "DEP,REG,CHEFLIEU,TNCC,NCC,NCCENR,LIBELLE
38,84,38185,2,ISERE,Isère,Isère
69,84,69123,2,RHONE,Rhône,Rhône
",
    );
    write(
        &dir.join("v_commune_2025.csv"),
        "TYPECOM,COM,REG,DEP,CTCD,ARR,TNCC,NCC,NCCENR,LIBELLE,CAN,COMPARENT
COM,38185,84,38,38D,381,0,GRENOBLE,Grenoble,Grenoble,3899,
COM,69123,84,69,69D,691,0,LYON,Lyon,Lyon,6999,
",
    );
    write(
        &dir.join("naf_niveau_1.csv"),
        "Code,Libellé
F,Construction
",
    );
}

#[test]
fn removed_files_do_not_affect_loaded_tables() {
    let dir = unique_temp_dir("idempotent");
    write_fixtures(&dir);
    let cog = CogContext::new(CogConfig::from_dir(&dir));

    assert_eq!(cog.region_code("auvergne-rhône-alpes").unwrap(), Some("84"));
    assert_eq!(cog.commune_code("Grenoble", None).unwrap().code(), Some("38185"));

    fs::remove_file(dir.join("v_region_2025.csv")).unwrap();
    write(&dir.join("v_commune_2025.csv"), "not,a,commune,file\n");

    assert_eq!(cog.region_code("auvergne-rhône-alpes").unwrap(), Some("84"));
    assert_eq!(cog.region_name("84").unwrap(), Some("Auvergne-Rhône-Alpes"));
    assert_eq!(cog.commune_code("Grenoble", None).unwrap().code(), Some("38185"));

    // A fresh context sees the broken files.
    let fresh = CogContext::new(CogConfig::from_dir(&dir));
    assert!(matches!(
        fresh.region_code("Auvergne-Rhône-Alpes"),
        Err(CogError::DatasetUnavailable {
            dataset: Dataset::Regions,
            ..
        })
    ));
    assert!(matches!(
        fresh.commune_code("Grenoble", None),
        Err(CogError::DatasetUnavailable {
            dataset: Dataset::Communes,
            ..
        })
    ));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_failure_is_cached_and_scoped_to_one_table() {
    let dir = unique_temp_dir("failure");
    write_fixtures(&dir);
    write(&dir.join("naf_niveau_1.csv"), "Code,Label\nF,Construction\n");
    let cog = CogContext::new(CogConfig::from_dir(&dir));

    let first = cog.section_code("Construction").unwrap_err();
    match &first {
        CogError::DatasetUnavailable {
            dataset, reason, ..
        } => {
            assert_eq!(*dataset, Dataset::Sections);
            assert!(reason.contains("Libellé"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Fixing the file does not heal an already failed table.
    write(&dir.join("naf_niveau_1.csv"), "Code,Libellé\nF,Construction\n");
    assert_eq!(cog.section_label("F").unwrap_err(), first);

    // Other tables are unaffected.
    assert_eq!(cog.departement_code("Rhône").unwrap(), Some("69"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn concurrent_first_use_sees_one_build() {
    let dir = unique_temp_dir("concurrent");
    write_fixtures(&dir);
    let cog = CogContext::new(CogConfig::from_dir(&dir));

    let pointers: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let regions = cog.list_regions().expect("regions");
                    assert_eq!(regions.len(), 1);
                    let lyon = cog.commune_code("Lyon", Some("Rhône")).unwrap();
                    assert_eq!(lyon.code(), Some("69123"));
                    regions.as_ptr() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(pointers.windows(2).all(|pair| pair[0] == pair[1]));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn doctor_reports_each_dataset() {
    let dir = unique_temp_dir("doctor");
    write_fixtures(&dir);
    fs::remove_file(dir.join("v_departement_2025.csv")).unwrap();

    let report = DoctorReport::collect(&CogConfig::from_dir(&dir));
    assert!(!report.is_healthy());
    assert_eq!(report.datasets.len(), 4);

    let regions = &report.datasets[0];
    assert_eq!(regions.dataset, Dataset::Regions);
    assert!(regions.exists);
    assert_eq!(regions.entries, Some(1));
    assert_eq!(regions.sha256.as_ref().map(String::len), Some(64));

    let departements = &report.datasets[1];
    assert!(!departements.exists);
    assert!(departements.error.is_some());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["datasets"][2]["dataset"], "communes");
    assert_eq!(json["datasets"][2]["entries"], 2);

    fs::remove_dir_all(&dir).unwrap();
}
