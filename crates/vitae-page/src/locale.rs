//! Locale Data
//!
//! Serde model for the resume content and the common label strings, plus
//! a disk-backed store with a per-locale in-memory cache. The JSON field
//! names are camelCase, matching the locale files as published.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed locale file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub title: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub title: String,
    pub university: String,
    pub major: String,
    pub graduation: String,
    pub gpa: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// A technology with a proficiency level, rendered as a `<strength>` tag.
#[derive(Debug, Clone, Deserialize)]
pub struct Stack {
    pub lang: String,
    pub level: u8,
}

/// Free-form content that the locale files carry either as one string or
/// as a list of paragraphs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    One(String),
    Many(Vec<String>),
}

impl Contents {
    pub fn paragraphs(&self) -> Vec<&str> {
        match self {
            Contents::One(text) => vec![text.as_str()],
            Contents::Many(texts) => texts.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDetail {
    pub title: String,
    pub duration: String,
    #[serde(default)]
    pub stacks: Vec<Stack>,
    #[serde(default)]
    pub contents: Option<Contents>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub company: String,
    pub job_title: String,
    pub division: String,
    #[serde(default)]
    pub resigned_for: Option<String>,
    pub duration: String,
    #[serde(default)]
    pub experiences: Vec<ExperienceDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub title: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub items: Vec<ExperienceItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub title: String,
    pub duration: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub stacks: Vec<Stack>,
    #[serde(default)]
    pub backend_stacks: Vec<Stack>,
    #[serde(default)]
    pub frontend_stacks: Vec<Stack>,
    #[serde(default)]
    pub platforms: Vec<Stack>,
    #[serde(default)]
    pub contents: Option<Contents>,
    #[serde(default)]
    pub repo_link: Option<String>,
    #[serde(default)]
    pub repo_image_src: Option<String>,
    #[serde(default)]
    pub is_wip: bool,
    #[serde(default)]
    pub is_pending: bool,
    #[serde(default)]
    pub is_maintaining: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projects {
    pub title: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub items: Vec<ProjectItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertificationItem {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certifications {
    pub title: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub items: Vec<CertificationItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillItem {
    pub skill: String,
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<SkillItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    pub title: String,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    pub name: String,
    pub progress: u8,
    #[serde(default)]
    pub color: Option<String>,
    pub period: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub title: String,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub items: Vec<ProgressItem>,
}

/// `resume.json` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub title: String,
    pub last_update: String,
    pub profile: Profile,
    pub education: Education,
    pub work_experience: WorkExperience,
    pub current_projects: Projects,
    pub maintaining_projects: Projects,
    pub previous_projects: Projects,
    pub certifications: Certifications,
    pub skills: Skills,
    pub project_progress: ProjectProgress,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStrings {
    pub resume: String,
    pub name: String,
    pub email: String,
    pub last_update: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationStrings {
    pub university: String,
    pub major: String,
    pub graduation: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStrings {
    pub project_header: String,
    pub progress_header: String,
    pub period_header: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStrings {
    pub backend_stack: String,
    pub frontend_stack: String,
    pub platforms: String,
    pub stacks: String,
    pub additional_info: String,
    pub stacks_proficiency: String,
    pub progress: ProgressStrings,
}

/// `common.json` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonStrings {
    pub general: GeneralStrings,
    pub education: EducationStrings,
    pub projects: ProjectStrings,
}

#[derive(Deserialize)]
struct ResumeFile {
    resume: ResumeData,
}

#[derive(Deserialize)]
struct CommonFile {
    common: CommonStrings,
}

/// Everything one locale needs to build the page.
#[derive(Debug, Clone)]
pub struct LocaleData {
    pub resume: ResumeData,
    pub common: CommonStrings,
}

/// Loads `<root>/<locale>/{resume,common}.json` with a per-locale cache.
/// Cached data is served until explicitly invalidated.
#[derive(Debug, Default)]
pub struct LocaleStore {
    root: PathBuf,
    cache: HashMap<String, Arc<LocaleData>>,
}

impl LocaleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn load(&mut self, locale: &str) -> Result<Arc<LocaleData>, LocaleError> {
        if let Some(data) = self.cache.get(locale) {
            tracing::debug!(locale, "locale cache hit");
            return Ok(Arc::clone(data));
        }
        tracing::debug!(locale, "locale cache miss, loading from disk");

        let dir = self.root.join(locale);
        let resume: ResumeFile = read_json(&dir.join("resume.json"))?;
        let common: CommonFile = read_json(&dir.join("common.json"))?;

        let data = Arc::new(LocaleData {
            resume: resume.resume,
            common: common.common,
        });
        self.cache.insert(locale.to_string(), Arc::clone(&data));
        Ok(data)
    }

    /// Drop one locale from the cache, or every locale when `None`.
    pub fn invalidate(&mut self, locale: Option<&str>) {
        match locale {
            Some(locale) => {
                self.cache.remove(locale);
                tracing::debug!(locale, "locale cache invalidated");
            }
            None => {
                self.cache.clear();
                tracing::debug!("all locale caches invalidated");
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LocaleError> {
    let text = std::fs::read_to_string(path).map_err(|source| LocaleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LocaleError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

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
            "currentProjects": {"title": "Current Projects", "items": []},
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

    fn write_locale(dir: &Path, locale: &str, resume: &str, common: &str) {
        let locale_dir = dir.join(locale);
        std::fs::create_dir_all(&locale_dir).unwrap();
        std::fs::write(locale_dir.join("resume.json"), resume).unwrap();
        std::fs::write(locale_dir.join("common.json"), common).unwrap();
    }

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vitae-locale-{test}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_and_parses_both_packs() {
        let dir = scratch_dir("load");
        write_locale(&dir, "en", RESUME_JSON, COMMON_JSON);

        let mut store = LocaleStore::new(&dir);
        let data = store.load("en").unwrap();
        assert_eq!(data.resume.profile.name, "Jane Doe");
        assert_eq!(data.resume.work_experience.items[0].job_title, "Engineer");
        assert_eq!(data.common.projects.progress.period_header, "Period");
        let contents = data.resume.work_experience.items[0].experiences[0]
            .contents
            .as_ref()
            .unwrap();
        assert_eq!(contents.paragraphs().len(), 1);
    }

    #[test]
    fn cache_serves_until_invalidated() {
        let dir = scratch_dir("cache");
        write_locale(&dir, "en", RESUME_JSON, COMMON_JSON);

        let mut store = LocaleStore::new(&dir);
        let first = store.load("en").unwrap();
        assert_eq!(first.resume.profile.name, "Jane Doe");

        let updated = RESUME_JSON.replace("Jane Doe", "June Doe");
        write_locale(&dir, "en", &updated, COMMON_JSON);

        let cached = store.load("en").unwrap();
        assert_eq!(cached.resume.profile.name, "Jane Doe");

        store.invalidate(Some("en"));
        let fresh = store.load("en").unwrap();
        assert_eq!(fresh.resume.profile.name, "June Doe");
    }

    #[test]
    fn missing_and_malformed_files_are_distinct_errors() {
        let dir = scratch_dir("errors");
        let mut store = LocaleStore::new(&dir);
        assert!(matches!(store.load("en"), Err(LocaleError::Io { .. })));

        write_locale(&dir, "ko", "{not json", COMMON_JSON);
        assert!(matches!(
            store.load("ko"),
            Err(LocaleError::Malformed { .. })
        ));
    }

    #[test]
    fn string_or_list_contents_both_parse() {
        let one: Contents = serde_json::from_str(r#""single paragraph""#).unwrap();
        assert_eq!(one.paragraphs(), vec!["single paragraph"]);
        let many: Contents = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many.paragraphs(), vec!["a", "b"]);
    }
}
