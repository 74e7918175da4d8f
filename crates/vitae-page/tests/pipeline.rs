//! End-to-end: locale files on disk, section building, pool
//! distribution, and index-ordered reassembly of the rendered page.

use std::path::PathBuf;
use std::sync::Arc;

use vitae_page::sections::build_resume;
use vitae_page::{default_registry, render_batch, EchoTranslator, LocaleStore, RenderProgram};
use vitae_pool::WorkerPool;

const RESUME_JSON: &str = r#"{
    "resume": {
        "title": "Resume",
        "lastUpdate": "2025-04-30",
        "profile": {"title": "Profile", "name": "Jane Doe", "email": "jane@example.com"},
        "education": {
            "title": "Education", "university": "State University",
            "major": "Computer Science", "graduation": "2018-02", "gpa": "3.8/4.5"
        },
        "workExperience": {
            "title": "Work Experience", "duration": "2018 ~ 2023",
            "items": [{
                "company": "Acme", "jobTitle": "Engineer", "division": "Platform",
                "duration": "2018-03 ~ 2020-01",
                "experiences": [{
                    "title": "Billing pipeline", "duration": "2018-03 ~ 2019-06",
                    "stacks": [{"lang": "Rust", "level": 4}],
                    "contents": ["Rebuilt the <highlight>invoice</highlight> pipeline."]
                }]
            }]
        },
        "currentProjects": {"title": "Current Projects", "items": [{
            "title": "vitae", "duration": "2025-01 ~ WIP", "isWip": true,
            "stacks": [{"lang": "Rust", "level": 4}]
        }]},
        "maintainingProjects": {"title": "Maintaining", "items": []},
        "previousProjects": {"title": "Previous Projects", "items": []},
        "certifications": {"title": "Certifications", "items": [
            {"name": "Engineer Cert", "date": "2019-11"}
        ]},
        "skills": {"title": "Skills", "categories": [
            {"name": "Languages", "items": [{"skill": "Rust", "level": 4}]}
        ]},
        "projectProgress": {"title": "Progress", "items": [
            {"name": "vitae", "progress": 80, "period": "2025"}
        ]}
    }
}"#;

const COMMON_JSON: &str = r#"{
    "common": {
        "general": {"resume": "Resume", "name": "Name", "email": "e-mail", "lastUpdate": "Last Update"},
        "education": {"university": "University", "major": "Major", "graduation": "Graduation", "gpa": "GPA"},
        "projects": {
            "backendStack": "Backend Stacks", "frontendStack": "Frontend Stacks",
            "platforms": "Platforms", "stacks": "Stacks",
            "additionalInfo": "additional info", "stacksProficiency": "Stacks I Experienced",
            "progress": {"projectHeader": "Project", "progressHeader": "Progress", "periodHeader": "Period"}
        }
    }
}"#;

fn scratch_locales() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vitae-pipeline-{}", std::process::id()));
    let locale_dir = dir.join("en");
    std::fs::create_dir_all(&locale_dir).unwrap();
    std::fs::write(locale_dir.join("resume.json"), RESUME_JSON).unwrap();
    std::fs::write(locale_dir.join("common.json"), COMMON_JSON).unwrap();
    dir
}

#[test]
fn locale_to_page_pipeline() {
    let dir = scratch_locales();
    let mut store = LocaleStore::new(&dir);
    let data = store.load("en").unwrap();

    let registry = default_registry();
    let blocks = build_resume(&data, &EchoTranslator, &registry);
    assert_eq!(blocks.len(), 13);

    let mut pool = WorkerPool::new(2, Arc::new(RenderProgram)).unwrap();
    let rendered = render_batch(&blocks, &pool).unwrap();
    pool.terminate();

    assert_eq!(rendered.len(), 13);
    assert!(rendered[0].starts_with("<header>"));
    assert!(rendered[2].contains("Last Update: 2025-04-30"));
    assert!(rendered.last().unwrap().contains("scroll-to-top-btn"));

    let page = rendered.join("\n");
    assert!(page.contains("Work Experience"));
    assert!(page.contains("Billing pipeline"));
    assert!(page.contains("<highlight>invoice</highlight>"));
    assert!(page.contains(r#"data-event-click="fold-section""#));
    assert!(page.contains(r#"data-event-click="change-theme""#));
    assert!(page.contains(r#"data-event-click="scroll-to-top""#));
    assert!(page.contains(r#"iswip="true""#));
    assert!(!page.contains(r#"to="WIP""#));
}

#[test]
fn rendering_is_deterministic_across_pool_sizes() {
    let dir = scratch_locales();
    let mut store = LocaleStore::new(&dir);
    let data = store.load("en").unwrap();
    let registry = default_registry();
    let blocks = build_resume(&data, &EchoTranslator, &registry);

    let mut single = WorkerPool::new(1, Arc::new(RenderProgram)).unwrap();
    let mut wide = WorkerPool::new(4, Arc::new(RenderProgram)).unwrap();
    let sequential = render_batch(&blocks, &single).unwrap();
    let parallel = render_batch(&blocks, &wide).unwrap();
    single.terminate();
    wide.terminate();

    assert_eq!(sequential, parallel);
}
