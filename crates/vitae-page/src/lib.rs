//! vitae Page - Resume assembly
//!
//! The locale data model and loader, the translator seam, the
//! event-handler registry, the section builders that turn locale data
//! into composer trees, and the batch renderer that drives the worker
//! pool and splices results back together in submission order.

pub mod batch;
pub mod i18n;
pub mod locale;
pub mod registry;
pub mod sections;
pub mod worker;

pub use batch::{render_batch, PageError};
pub use i18n::{EchoTranslator, TableTranslator, Translator};
pub use locale::{CommonStrings, LocaleData, LocaleError, LocaleStore, ResumeData};
pub use registry::{default_registry, EventRegistry};
pub use worker::RenderProgram;
