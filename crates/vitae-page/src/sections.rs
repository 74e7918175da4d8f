//! Section Builders
//!
//! Pure composer-tree construction over the locale data model. Every
//! builder mirrors one block of the published page: a section frame with
//! an optional folding circle in its header, and a content body that the
//! frame can roll up.

use vitae_compose::{escape_html, Composer, Tag};

use crate::i18n::Translator;
use crate::locale::{
    Certifications, Contents, Education, EducationStrings, GeneralStrings, LocaleData, Profile,
    ProjectProgress, ProjectStrings, Projects, Skills, Stack, WorkExperience,
};
use crate::registry::EventRegistry;

const FOLD_ICON_SVG: &str = r##"class="toggle-icon" width="26" height="26" viewBox="0 0 24 24" fill="currentColor" xmlns="http://www.w3.org/2000/svg""##;
const FOLD_ICON_PATH: &str = r##"d="M12 15.5L18 9.5L16.6 8L12 12.7L7.4 8L6 9.5L12 15.5Z""##;

const SCROLL_ICON_SVG: &str = r##"xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 20" fill="#fff""##;
const SCROLL_ICON_PATH: &str = r##"d="M12 4l-8 8 2 2 6-6 6 6 2-2-8-8z""##;

const EMAIL_ICON_SVG: &str = r##"id="contact-email" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" fill="none" version="1.1" width="20" height="17" viewBox="0 0 20 17""##;
const EMAIL_ICON_PATH: &str = r##"d="M16,17C16,17,14.6,15.6,14.6,15.6C14.6,15.6,16.175,14,16.175,14C16.175,14,12,14,12,14C12,14,12,12,12,12C12,12,16.175,12,16.175,12C16.175,12,14.6,10.4,14.6,10.4C14.6,10.4,16,9,16,9C16,9,20,13,20,13C20,13,16,17,16,17ZM8.4,8C8.4,8,15,4.15,15,4.15C15,4.15,15,2,15,2C15,2,14.75,2,14.75,2C14.75,2,8.4,5.675,8.4,5.675C8.4,5.675,2.225,2,2.225,2C2.225,2,2,2,2,2C2,2,2,4.2,2,4.2C2,4.2,8.4,8,8.4,8ZM1.875,14C1.35833,14,0.916667,13.8167,0.55,13.45C0.183333,13.0833,0,12.6417,0,12.125C0,12.125,0,1.875,0,1.875C0,1.35833,0.183333,0.916667,0.55,0.55C0.916667,0.183333,1.35833,0,1.875,0C1.875,0,15.125,0,15.125,0C15.6417,0,16.0833,0.183333,16.45,0.55C16.8167,0.916667,17,1.35833,17,1.875C17,1.875,17,7.1,17,7.1C16.8333,7.06667,16.6667,7.04167,16.5,7.025C16.3333,7.00833,16.1667,7,16,7C14.3667,7,12.9583,7.5875,11.775,8.7625C10.5917,9.9375,10,11.35,10,13C10,13.1667,10.0083,13.3333,10.025,13.5C10.0417,13.6667,10.0667,13.8333,10.1,14C10.1,14,1.875,14,1.875,14Z" fill="#566273" fill-opacity="1""##;

const MOON_ICON_SVG: &str = r##"id="moon" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" fill="none" version="1.1" width="17" height="17" viewBox="0 0 17 17""##;
const MOON_ICON_PATH: &str = r##"d="M8.41667,16.6667C7.25,16.6667,6.15625,16.4444,5.13542,16C4.11458,15.5556,3.22569,14.9549,2.46875,14.1979C1.71181,13.441,1.11111,12.5521,0.666667,11.5312C0.222222,10.5104,0,9.41667,0,8.25C0,6.22222,0.645833,4.43403,1.9375,2.88542C3.22917,1.33681,4.875,0.375,6.875,0C6.625,1.375,6.70139,2.71875,7.10417,4.03125C7.50694,5.34375,8.20139,6.49306,9.1875,7.47917C10.1736,8.46528,11.3229,9.15972,12.6354,9.5625C13.9479,9.96528,15.2917,10.0417,16.6667,9.79167C16.3056,11.7917,15.3472,13.4375,13.7917,14.7292C12.2361,16.0208,10.4444,16.6667,8.41667,16.6667Z" fill="#566273" fill-opacity="1""##;

const SUN_ICON_SVG: &str = r##"id="sun" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" fill="none" version="1.1" width="22" height="22" viewBox="0 0 22 22""##;
const SUN_ICON_PATH: &str = r##"d="M10,3C10,3,10,0,10,0C10,0,12,0,12,0C12,0,12,3,12,3C12,3,10,3,10,3ZM10,22C10,22,10,19,10,19C10,19,12,19,12,19C12,19,12,22,12,22C12,22,10,22,10,22ZM19,12C19,12,19,10,19,10C19,10,22,10,22,10C22,10,22,12,22,12C22,12,19,12,19,12ZM0,12C0,12,0,10,0,10C0,10,3,10,3,10C3,10,3,12,3,12C3,12,0,12,0,12ZM17.7,5.7C17.7,5.7,16.3,4.3,16.3,4.3C16.3,4.3,18.05,2.5,18.05,2.5C18.05,2.5,19.5,3.95,19.5,3.95C19.5,3.95,17.7,5.7,17.7,5.7ZM3.95,19.5C3.95,19.5,2.5,18.05,2.5,18.05C2.5,18.05,4.3,16.3,4.3,16.3C4.3,16.3,5.7,17.7,5.7,17.7C5.7,17.7,3.95,19.5,3.95,19.5ZM18.05,19.5C18.05,19.5,16.3,17.7,16.3,17.7C16.3,17.7,17.7,16.3,17.7,16.3C17.7,16.3,19.5,18.05,19.5,18.05C19.5,18.05,18.05,19.5,18.05,19.5ZM4.3,5.7C4.3,5.7,2.5,3.95,2.5,3.95C2.5,3.95,3.95,2.5,3.95,2.5C3.95,2.5,5.7,4.3,5.7,4.3C5.7,4.3,4.3,5.7,4.3,5.7ZM11,17C9.33333,17,7.91667,16.4167,6.75,15.25C5.58333,14.0833,5,12.6667,5,11C5,9.33333,5.58333,7.91667,6.75,6.75C7.91667,5.58333,9.33333,5,11,5C12.6667,5,14.0833,5.58333,15.25,6.75C16.4167,7.91667,17,9.33333,17,11C17,12.6667,16.4167,14.0833,15.25,15.25C14.0833,16.4167,12.6667,17,11,17Z" fill="#566273" fill-opacity="1""##;

const LANG_KO_ICON_SVG: &str = r##"id="lang-ko" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10.825 11.4" width="1em" height="0.9em""##;
const LANG_KO_ICON_PATH: &str = r##"d="M 3.525 6.275 C 3.958 6.275 4.329 6.179 4.637 5.988 C 4.946 5.796 5.1 5.508 5.1 5.125 C 5.1 4.742 4.946 4.45 4.637 4.25 C 4.329 4.05 3.958 3.95 3.525 3.95 C 3.092 3.95 2.721 4.05 2.412 4.25 C 2.104 4.45 1.95 4.742 1.95 5.125 C 1.95 5.508 2.104 5.796 2.412 5.988 C 2.721 6.179 3.092 6.275 3.525 6.275 Z M 0 2.5 C 0 2.5 0 1.4 0 1.4 C 0 1.4 2.85 1.4 2.85 1.4 C 2.85 1.4 2.85 0 2.85 0 C 2.85 0 4.15 0 4.15 0 C 4.15 0 4.15 1.4 4.15 1.4 C 4.15 1.4 7.025 1.4 7.025 1.4 C 7.025 1.4 7.025 2.5 7.025 2.5 C 7.025 2.5 0 2.5 0 2.5 Z M 3.525 7.375 C 2.742 7.375 2.071 7.179 1.513 6.787 C 0.954 6.396 0.675 5.842 0.675 5.125 C 0.675 4.392 0.954 3.833 1.513 3.45 C 2.071 3.067 2.742 2.875 3.525 2.875 C 4.325 2.875 5.004 3.067 5.563 3.45 C 6.121 3.833 6.4 4.392 6.4 5.125 C 6.4 5.858 6.121 6.417 5.563 6.8 C 5.004 7.183 4.325 7.375 3.525 7.375 Z M 1.7 11.4 C 1.7 11.4 1.7 7.9 1.7 7.9 C 1.7 7.9 3.025 7.9 3.025 7.9 C 3.025 7.9 3.025 10.3 3.025 10.3 C 3.025 10.3 9.625 10.3 9.625 10.3 C 9.625 10.3 9.625 11.4 9.625 11.4 C 9.625 11.4 1.7 11.4 1.7 11.4 Z M 7.825 8.775 C 7.825 8.775 7.825 0 7.825 0 C 7.825 0 9.1 0 9.1 0 C 9.1 0 9.1 3.75 9.1 3.75 C 9.1 3.75 10.825 3.75 10.825 3.75 C 10.825 3.75 10.825 4.85 10.825 4.85 C 10.825 4.85 9.125 4.85 9.125 4.85 C 9.125 4.85 9.125 8.775 9.125 8.775 C 9.125 8.775 7.825 8.775 7.825 8.775 Z" fill="#566273" fill-opacity="1""##;

const LANG_EN_ICON_SVG: &str = r##"id="lang-en" xmlns="http://www.w3.org/2000/svg" viewBox="12.025 0.1 8.225 10.95" width="8.225px" height="10.95px""##;
const LANG_EN_ICON_PATH: &str = r##"d="M 15.675 9.35 C 16.142 9.35 16.596 9.242 17.038 9.025 C 17.479 8.808 17.883 8.5 18.25 8.1 C 18.25 8.1 18.25 5.45 18.25 5.45 C 17.867 5.5 17.513 5.558 17.188 5.625 C 16.862 5.692 16.558 5.767 16.275 5.85 C 15.525 6.083 14.962 6.375 14.587 6.725 C 14.212 7.075 14.025 7.483 14.025 7.95 C 14.025 8.383 14.175 8.725 14.475 8.975 C 14.775 9.225 15.175 9.35 15.675 9.35 Z M 15.1 11.05 C 14.15 11.05 13.4 10.779 12.85 10.238 C 12.3 9.696 12.025 8.958 12.025 8.025 C 12.025 7.158 12.3 6.45 12.85 5.9 C 13.4 5.35 14.283 4.908 15.5 4.575 C 15.883 4.475 16.304 4.383 16.763 4.3 C 17.221 4.217 17.717 4.142 18.25 4.075 C 18.217 3.292 18.033 2.721 17.7 2.362 C 17.367 2.004 16.85 1.825 16.15 1.825 C 15.717 1.825 15.288 1.904 14.863 2.063 C 14.438 2.221 13.892 2.5 13.225 2.9 C 13.225 2.9 12.425 1.5 12.425 1.5 C 12.975 1.083 13.621 0.746 14.363 0.488 C 15.104 0.229 15.858 0.1 16.625 0.1 C 17.808 0.1 18.708 0.467 19.325 1.2 C 19.942 1.933 20.25 3 20.25 4.4 C 20.25 4.4 20.25 10.825 20.25 10.825 C 20.25 10.825 18.575 10.825 18.575 10.825 C 18.575 10.825 18.425 9.7 18.425 9.7 C 17.958 10.117 17.446 10.446 16.888 10.688 C 16.329 10.929 15.733 11.05 15.1 11.05 Z" fill="#566273" fill-opacity="1""##;

fn icon(svg_attrs: &str, path_attrs: &str) -> Composer {
    Composer::from_raw_attributes(Tag::Svg, svg_attrs)
        .append_child(Composer::from_raw_attributes(Tag::Path, path_attrs))
}

/// The clickable fold toggle placed in a section header.
pub fn folding_circle(registry: &EventRegistry) -> Composer {
    Composer::new(Tag::Span)
        .set_attribute("class", "folding-circle")
        .append_child(icon(FOLD_ICON_SVG, FOLD_ICON_PATH))
        .set_event(
            "click",
            registry.handler_or_noop("fold-section"),
            "fold-section",
        )
}

pub fn scroll_to_top_button(registry: &EventRegistry) -> Composer {
    Composer::new(Tag::Button)
        .set_attribute("id", "scroll-to-top-btn")
        .set_attribute("class", "scroll-to-top-btn")
        .set_attribute("title", "Scroll to top")
        .set_attribute("type", "button")
        .append_child(icon(SCROLL_ICON_SVG, SCROLL_ICON_PATH))
        .set_event(
            "click",
            registry.handler_or_noop("scroll-to-top"),
            "scroll-to-top",
        )
}

/// Theme and language toggles, top right of the page.
pub fn option_buttons(registry: &EventRegistry) -> Composer {
    let theme_button = Composer::new(Tag::Button)
        .set_attribute("id", "dark-mode-button")
        .set_attribute("class", "flexbox circle align-center-h align-center-v mr-2")
        .set_attribute("type", "button")
        .append_child(icon(MOON_ICON_SVG, MOON_ICON_PATH))
        .append_child(icon(SUN_ICON_SVG, SUN_ICON_PATH))
        .set_event(
            "click",
            registry.handler_or_noop("change-theme"),
            "change-theme",
        );

    let lang_button = Composer::new(Tag::Button)
        .set_attribute("id", "change-lang-button")
        .set_attribute("class", "flexbox circle align-center-h align-center-v mr-1")
        .set_attribute("type", "button")
        .append_child(icon(LANG_KO_ICON_SVG, LANG_KO_ICON_PATH))
        .append_child(icon(LANG_EN_ICON_SVG, LANG_EN_ICON_PATH))
        .set_event(
            "click",
            registry.handler_or_noop("change-lang"),
            "change-lang",
        );

    Composer::new(Tag::Div)
        .set_attribute("class", "flexbox align-right-h mb-2")
        .append_child(theme_button)
        .append_child(lang_button)
}

pub fn page_header(general: &GeneralStrings, t: &dyn Translator) -> Composer {
    Composer::new(Tag::Header).set_inner_text(&t.translate(&general.resume))
}

pub fn last_update_stamp(general: &GeneralStrings, last_update: &str, t: &dyn Translator) -> Composer {
    Composer::new(Tag::Time)
        .set_attribute("id", "last-update")
        .set_attribute("class", "block text-align-right-h")
        .set_inner_text(&format!("{}: {last_update}", t.translate(&general.last_update)))
}

fn stack_item(stack: &Stack) -> Composer {
    let strength = format!(
        r#"<strength level="{}">{}</strength>"#,
        stack.level,
        escape_html(&stack.lang)
    );
    Composer::new(Tag::Span)
        .set_attribute("class", "inline-flexbox")
        .set_inner_html(&strength)
}

/// Locale content paragraphs carry trusted inline markup (`<highlight>`
/// and the like), so they pass through as raw HTML.
fn content_paragraph(html: &str) -> Composer {
    Composer::new(Tag::P).set_inner_html(html)
}

fn participant_item(html: &str) -> Composer {
    Composer::new(Tag::Div).set_inner_html(html)
}

fn split_period(duration: &str) -> (&str, Option<&str>) {
    match duration.split_once(" ~ ") {
        Some((from, to)) => (from, Some(to)),
        None => (duration, None),
    }
}

fn with_period(node: Composer, duration: &str) -> Composer {
    let (from, to) = split_period(duration);
    let node = node.set_attribute("from", from);
    match to {
        Some(to) => node.set_attribute("to", to),
        None => node,
    }
}

/// The shared section shell: header row with the title area and an
/// optional folding circle, then a rollable content body.
pub fn section_frame(
    title: Composer,
    body: Composer,
    requires_folding: bool,
    has_subtitle: bool,
    registry: &EventRegistry,
) -> Composer {
    let title_area = Composer::new(Tag::Div)
        .set_attribute(
            "class",
            if has_subtitle {
                "title-area with-subtitle"
            } else {
                "title-area"
            },
        )
        .append_child(title);

    let mut header = Composer::new(Tag::Div)
        .set_attribute("class", "flexbox align-center-v inline")
        .append_child(title_area);
    if requires_folding {
        header = header.append_child(folding_circle(registry));
    }

    let body_area = Composer::new(Tag::Div)
        .set_attribute("class", "content-body")
        .append_child(body);
    let content_list = Composer::new(Tag::Div)
        .set_attribute("class", "content-list")
        .append_child(body_area);

    Composer::new(Tag::Section)
        .append_child(header)
        .append_child(content_list)
}

pub fn profile_section(
    profile: &Profile,
    general: &GeneralStrings,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Composer {
    let title = Composer::new(Tag::H1).set_inner_text(&t.translate(&profile.title));

    let name_line = Composer::new(Tag::Div).set_inner_html(&format!(
        "<b>{}:</b> {}",
        t.translate(&general.name),
        escape_html(&t.translate(&profile.name))
    ));

    let email_icon = Composer::new(Tag::Span)
        .set_attribute("class", "ml-1 mt-1")
        .append_child(icon(EMAIL_ICON_SVG, EMAIL_ICON_PATH));

    let email_line = Composer::new(Tag::Div)
        .set_inner_html(&format!(
            r#"<b>{}: </b><a class="inline-flexbox align-center-v" href="mailto:{}"> {}</a>"#,
            t.translate(&general.email),
            profile.email,
            escape_html(&profile.email)
        ))
        .append_child(email_icon);

    let body = Composer::new(Tag::Div)
        .set_attribute("class", "indent flexbox flex-column gap-1")
        .set_attribute("level", "1")
        .append_child(name_line)
        .append_child(email_line);

    section_frame(title, body, false, false, registry)
}

pub fn education_section(
    education: &Education,
    strings: &EducationStrings,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Composer {
    let title = Composer::new(Tag::H1)
        .set_attribute("class", "inline")
        .set_inner_text(&t.translate(&education.title));
    let mut title_content = Composer::fragment().append_child(title);
    if let Some(date) = &education.date {
        title_content = title_content.append_child(
            Composer::new(Tag::Time)
                .set_attribute("class", "indent date")
                .set_attribute("level", "0.5")
                .set_inner_text(&t.translate(date)),
        );
    }

    let info = |label: &str, value: &str| {
        Composer::new(Tag::Div).set_inner_html(&format!(
            "<b>{}:</b> {}",
            escape_html(&t.translate(label)),
            escape_html(value)
        ))
    };

    let body = Composer::new(Tag::Div)
        .set_attribute("class", "indent flexbox flex-column gap-1")
        .set_attribute("level", "1")
        .append_child(info(&strings.university, &education.university))
        .append_child(info(&strings.major, &education.major))
        .append_child(info(&strings.graduation, &education.graduation))
        .append_child(info(&strings.gpa, &education.gpa));

    section_frame(title_content, body, true, false, registry)
}

pub fn work_experience_section(
    work: &WorkExperience,
    strings: &ProjectStrings,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Composer {
    let title = Composer::new(Tag::H1)
        .set_attribute("class", "inline")
        .set_inner_text(&t.translate(&work.title));
    let mut title_content = Composer::fragment().append_child(title);
    if let Some(duration) = &work.duration {
        title_content = title_content.append_child(
            Composer::new(Tag::Time)
                .set_attribute("class", "indent date")
                .set_attribute("level", "0.5")
                .set_inner_text(&t.translate(duration)),
        );
    }

    let mut body = Composer::fragment();
    for item in &work.items {
        let header = Composer::new(Tag::Div)
            .set_attribute("class", "title-area")
            .append_child(
                Composer::new(Tag::H1)
                    .set_attribute("class", "company-name inline")
                    .set_inner_text(&t.translate(&item.company)),
            )
            .append_child(
                Composer::new(Tag::Time)
                    .set_attribute("class", "indent date")
                    .set_attribute("level", "0.5")
                    .set_inner_text(&t.translate(&item.duration)),
            );

        let mut division = Composer::new(Tag::Div)
            .set_attribute("class", "indent mt-1 mb-1")
            .set_attribute("level", "1")
            .append_child(
                Composer::new(Tag::Div)
                    .set_attribute("class", "division-name")
                    .set_inner_text(&format!(
                        "{} | {}",
                        t.translate(&item.job_title),
                        t.translate(&item.division)
                    )),
            );
        if let Some(reason) = &item.resigned_for {
            division =
                division.append_child(Composer::new(Tag::Div).set_inner_text(&t.translate(reason)));
        }

        let mut experiences = Composer::fragment();
        for exp in &item.experiences {
            let mut entry = Composer::new(Tag::Div)
                .set_attribute("class", "experience-item")
                .append_child(
                    Composer::new(Tag::Div)
                        .set_attribute("class", "title")
                        .set_inner_text(&t.translate(&exp.title)),
                )
                .append_child(
                    Composer::new(Tag::Time)
                        .set_attribute("class", "indent date")
                        .set_attribute("level", "1")
                        .set_inner_text(&t.translate(&exp.duration)),
                );

            if !exp.stacks.is_empty() {
                let mut stacks = Composer::new(Tag::Div)
                    .set_attribute("class", "mt-2 gap-1")
                    .set_inner_html(&format!("<span>{}: </span>", t.translate(&strings.stacks)));
                for stack in &exp.stacks {
                    stacks = stacks.append_child(stack_item(stack));
                }
                entry = entry.append_child(stacks);
            }

            let paragraphs = exp
                .contents
                .as_ref()
                .map(Contents::paragraphs)
                .unwrap_or_default();
            if !paragraphs.is_empty() {
                let mut content = with_period(
                    Composer::new(Tag::Div).set_attribute("class", "content"),
                    &exp.duration,
                );
                for paragraph in paragraphs {
                    content = content.append_child(content_paragraph(paragraph));
                }
                entry = entry.append_child(content);
            }

            experiences = experiences.append_child(entry);
        }

        let company = with_period(
            Composer::new(Tag::Div)
                .set_attribute("class", "indent")
                .set_attribute("level", "1"),
            &item.duration,
        )
        .append_child(header)
        .append_child(division)
        .append_child(experiences);

        body = body.append_child(company);
    }

    section_frame(title_content, body, true, false, registry)
}

pub fn project_section(
    projects: &Projects,
    strings: &ProjectStrings,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Composer {
    let title = Composer::new(Tag::H1)
        .set_attribute("class", "inline")
        .set_inner_text(&t.translate(&projects.title));
    let mut title_content = Composer::fragment().append_child(title);
    if let Some(duration) = &projects.duration {
        title_content = title_content.append_child(
            Composer::new(Tag::Time)
                .set_attribute("class", "indent date")
                .set_attribute("level", "1")
                .set_inner_text(&t.translate(duration)),
        );
    }

    let mut body = Composer::fragment();
    for item in &projects.items {
        let (from, to) = split_period(&item.duration);

        let mut container = Composer::new(Tag::Div)
            .set_attribute("class", "indent")
            .set_attribute("level", "1")
            .set_attribute("from", from);
        // Status words stand in for an end date on open-ended projects.
        if let Some(to) = to {
            if !matches!(to, "WIP" | "Pending" | "Maintaining") {
                container = container.set_attribute("to", to);
            }
        }
        if item.is_wip {
            container = container.set_attribute("isWip", "true");
        }
        if item.is_pending {
            container = container.set_attribute("isPending", "true");
        }
        if item.is_maintaining {
            container = container.set_attribute("isMaintaining", "true");
        }

        container = container.append_child(
            Composer::new(Tag::Div)
                .set_attribute("class", "experience-item")
                .append_child(
                    Composer::new(Tag::Div)
                        .set_attribute("class", "title")
                        .set_inner_text(&t.translate(&item.title)),
                )
                .append_child(
                    Composer::new(Tag::Time)
                        .set_attribute("class", "indent date")
                        .set_attribute("level", "1")
                        .set_inner_text(&t.translate(&item.duration)),
                ),
        );

        if !item.participants.is_empty() {
            let mut participants = Composer::new(Tag::Div)
                .set_attribute("class", "participants flexbox flex-column gap-1");
            for participant in &item.participants {
                participants = participants.append_child(participant_item(participant));
            }
            container = container.append_child(participants);
        }

        let stack_groups: [(&str, &[Stack], Option<&str>); 4] = [
            (strings.backend_stack.as_str(), item.backend_stacks.as_slice(), None),
            (strings.frontend_stack.as_str(), item.frontend_stacks.as_slice(), None),
            (strings.stacks.as_str(), item.stacks.as_slice(), Some("stack-container")),
            (strings.platforms.as_str(), item.platforms.as_slice(), None),
        ];
        for (label, stacks, class) in stack_groups {
            if stacks.is_empty() {
                continue;
            }
            let mut group = Composer::new(Tag::Div);
            if let Some(class) = class {
                group = group.set_attribute("class", class);
            }
            group = group.set_inner_text(&format!("{}: ", t.translate(label)));
            for stack in stacks {
                group = group.append_child(stack_item(stack));
            }
            container = container.append_child(group);
        }

        let wip_flags = |mut node: Composer| {
            if to.is_some() {
                if item.is_wip {
                    node = node.set_attribute("isWip", "true");
                }
                if item.is_pending {
                    node = node.set_attribute("isPending", "true");
                }
                if item.is_maintaining {
                    node = node.set_attribute("isMaintaining", "true");
                }
            }
            node
        };

        let paragraphs = item
            .contents
            .as_ref()
            .map(Contents::paragraphs)
            .unwrap_or_default();
        if !paragraphs.is_empty() {
            let mut content = wip_flags(
                Composer::new(Tag::Div)
                    .set_attribute("class", "content")
                    .set_attribute("from", from),
            );
            for paragraph in paragraphs {
                content = content.append_child(content_paragraph(paragraph));
            }
            container = container.append_child(content);
        }

        if let (Some(link), Some(src)) = (&item.repo_link, &item.repo_image_src) {
            let image = Composer::new(Tag::Img)
                .set_attribute("src", src)
                .set_attribute("alt", &format!("{} repo stats", item.title));
            let anchor = Composer::new(Tag::A)
                .set_attribute("href", link)
                .append_child(image);
            let repo = wip_flags(
                Composer::new(Tag::Div)
                    .set_attribute("class", "content repo")
                    .set_attribute("from", from),
            )
            .append_child(anchor);
            container = container.append_child(repo);
        }

        body = body.append_child(container);
    }

    section_frame(title_content, body, true, false, registry)
}

pub fn certifications_section(
    certifications: &Certifications,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Composer {
    let title = Composer::new(Tag::H1)
        .set_attribute("class", "inline")
        .set_inner_text(&t.translate(&certifications.title));
    let mut title_content = Composer::fragment().append_child(title);
    if let Some(duration) = &certifications.duration {
        title_content = title_content.append_child(
            Composer::new(Tag::Time)
                .set_attribute("class", "indent date")
                .set_attribute("level", "0.5")
                .set_inner_text(&t.translate(duration)),
        );
    }

    let mut body = Composer::fragment();
    for item in &certifications.items {
        body = body.append_child(
            Composer::new(Tag::Div)
                .set_attribute("class", "indent")
                .set_attribute("level", "1")
                .set_attribute("from", &item.date)
                .append_child(
                    Composer::new(Tag::Div)
                        .set_attribute("class", "title")
                        .set_inner_text(&t.translate(&item.name)),
                )
                .append_child(
                    Composer::new(Tag::Time)
                        .set_attribute("class", "date")
                        .set_inner_text(&t.translate(&item.date)),
                ),
        );
    }

    section_frame(title_content, body, true, false, registry)
}

pub fn skills_section(
    skills: &Skills,
    strings: &ProjectStrings,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Composer {
    let title = Composer::new(Tag::H1).set_inner_text(&t.translate(&skills.title));
    let subtitle = Composer::new(Tag::H2)
        .set_attribute("class", "sub-title")
        .set_inner_text(&t.translate(&strings.stacks_proficiency));
    let title_content = Composer::fragment().append_child(title).append_child(subtitle);

    let mut table_body = Composer::new(Tag::Tbody);
    for category in &skills.categories {
        let mut cells = Composer::new(Tag::Td).set_attribute("class", "skills-cell");
        for item in &category.items {
            cells = cells.append_child(stack_item(&Stack {
                lang: t.translate(&item.skill),
                level: item.level,
            }));
        }
        table_body = table_body.append_child(
            Composer::new(Tag::Tr)
                .append_child(
                    Composer::new(Tag::Td)
                        .set_attribute("class", "label-cell")
                        .set_inner_text(&t.translate(&category.name)),
                )
                .append_child(cells),
        );
    }

    let table = Composer::new(Tag::Table)
        .set_attribute("class", "skills-table")
        .append_child(table_body);

    let body = Composer::new(Tag::Div)
        .set_attribute("class", "skills-container")
        .append_child(
            Composer::new(Tag::Div)
                .set_attribute("class", "skills-container")
                .append_child(table),
        );

    section_frame(title_content, body, true, true, registry)
}

pub fn project_progress_section(
    progress: &ProjectProgress,
    strings: &ProjectStrings,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Composer {
    let title = Composer::new(Tag::H1)
        .set_attribute("class", "inline")
        .set_inner_text(&t.translate(&progress.title));
    let subtitle = Composer::new(Tag::H2)
        .set_attribute("class", "sub-title")
        .set_inner_text(&t.translate(&strings.additional_info));
    let title_content = Composer::fragment().append_child(title).append_child(subtitle);

    let headers = &strings.progress;
    let table_head = Composer::new(Tag::Thead).append_child(
        Composer::new(Tag::Tr)
            .append_child(
                Composer::new(Tag::Th).set_inner_text(&t.translate(&headers.project_header)),
            )
            .append_child(
                Composer::new(Tag::Th).set_inner_text(&t.translate(&headers.progress_header)),
            )
            .append_child(
                Composer::new(Tag::Th).set_inner_text(&t.translate(&headers.period_header)),
            ),
    );

    let mut table_body = Composer::new(Tag::Tbody);
    for item in &progress.items {
        let src = match &item.color {
            Some(color) => format!(
                "https://progress-bar.xyz/{}?progress_color={color}",
                item.progress
            ),
            None => format!("https://progress-bar.xyz/{}", item.progress),
        };
        let image = Composer::new(Tag::Img)
            .set_attribute("src", &src)
            .set_attribute("alt", &format!("progress {}%", item.progress));

        table_body = table_body.append_child(
            Composer::new(Tag::Tr)
                .append_child(Composer::new(Tag::Td).set_inner_text(&t.translate(&item.name)))
                .append_child(Composer::new(Tag::Td).append_child(image))
                .append_child(Composer::new(Tag::Td).set_inner_text(&t.translate(&item.period))),
        );
    }

    let table = Composer::new(Tag::Table)
        .set_attribute("class", "projects-table")
        .append_child(table_head)
        .append_child(table_body);

    section_frame(title_content, table, true, true, registry)
}

/// The full page, one composer per top-level block, in display order.
/// Each block renders independently, so this is also the batch boundary.
pub fn build_resume(
    locale: &LocaleData,
    t: &dyn Translator,
    registry: &EventRegistry,
) -> Vec<Composer> {
    let resume = &locale.resume;
    let common = &locale.common;
    vec![
        page_header(&common.general, t),
        option_buttons(registry),
        last_update_stamp(&common.general, &resume.last_update, t),
        profile_section(&resume.profile, &common.general, t, registry),
        education_section(&resume.education, &common.education, t, registry),
        work_experience_section(&resume.work_experience, &common.projects, t, registry),
        project_section(&resume.current_projects, &common.projects, t, registry),
        project_section(&resume.maintaining_projects, &common.projects, t, registry),
        project_section(&resume.previous_projects, &common.projects, t, registry),
        certifications_section(&resume.certifications, t, registry),
        skills_section(&resume.skills, &common.projects, t, registry),
        project_progress_section(&resume.project_progress, &common.projects, t, registry),
        scroll_to_top_button(registry),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::EchoTranslator;
    use crate::locale::{CertificationItem, ProgressItem, ProjectItem, SkillCategory, SkillItem};
    use crate::registry::default_registry;

    fn profile() -> Profile {
        Profile {
            title: "Profile".into(),
            name: "Jane & Co".into(),
            email: "jane@example.com".into(),
        }
    }

    fn general() -> GeneralStrings {
        GeneralStrings {
            resume: "Resume".into(),
            name: "Name".into(),
            email: "e-mail".into(),
            last_update: "Last Update".into(),
        }
    }

    fn project_strings() -> ProjectStrings {
        ProjectStrings {
            backend_stack: "Backend Stacks".into(),
            frontend_stack: "Frontend Stacks".into(),
            platforms: "Platforms".into(),
            stacks: "Stacks".into(),
            additional_info: "additional info".into(),
            stacks_proficiency: "Stacks I Experienced".into(),
            progress: crate::locale::ProgressStrings {
                project_header: "Project".into(),
                progress_header: "Progress".into(),
                period_header: "Period".into(),
            },
        }
    }

    #[test]
    fn section_frame_places_folding_circle_in_header() {
        let registry = default_registry();
        let html = section_frame(
            Composer::new(Tag::H1).set_inner_text("Title"),
            Composer::new(Tag::Div).set_inner_text("body"),
            true,
            false,
            &registry,
        )
        .to_html_string();

        assert!(html.starts_with("<section>"));
        assert!(html.contains(r#"class="folding-circle""#));
        assert!(html.contains(r#"data-event-click="fold-section""#));
        assert!(html.contains(r#"class="content-body""#));
    }

    #[test]
    fn unfolded_sections_have_no_circle() {
        let registry = default_registry();
        let html = profile_section(&profile(), &general(), &EchoTranslator, &registry)
            .to_html_string();
        assert!(!html.contains("folding-circle"));
        assert!(html.contains(r#"href="mailto:jane@example.com""#));
        // Name flows through inner_html pre-escaped.
        assert!(html.contains("Jane &amp; Co"));
    }

    #[test]
    fn open_ended_projects_keep_status_out_of_the_to_attribute() {
        let registry = default_registry();
        let projects = Projects {
            title: "Current Projects".into(),
            duration: None,
            items: vec![ProjectItem {
                title: "vitae".into(),
                duration: "2025-01 ~ WIP".into(),
                participants: vec![],
                stacks: vec![Stack {
                    lang: "Rust".into(),
                    level: 4,
                }],
                backend_stacks: vec![],
                frontend_stacks: vec![],
                platforms: vec![],
                contents: None,
                repo_link: None,
                repo_image_src: None,
                is_wip: true,
                is_pending: false,
                is_maintaining: false,
            }],
        };

        let html =
            project_section(&projects, &project_strings(), &EchoTranslator, &registry)
                .to_html_string();
        assert!(html.contains(r#"from="2025-01""#));
        assert!(!html.contains(r#"to="WIP""#));
        // Attribute names normalize to lower case outside SVG scope.
        assert!(html.contains(r#"iswip="true""#));
        assert!(html.contains(r#"<strength level="4">Rust</strength>"#));
    }

    #[test]
    fn skills_table_has_one_row_per_category() {
        let registry = default_registry();
        let skills = Skills {
            title: "Skills".into(),
            sub_title: None,
            categories: vec![
                SkillCategory {
                    name: "Languages".into(),
                    items: vec![SkillItem {
                        skill: "Rust".into(),
                        level: 4,
                    }],
                },
                SkillCategory {
                    name: "Tools".into(),
                    items: vec![],
                },
            ],
        };

        let html = skills_section(&skills, &project_strings(), &EchoTranslator, &registry)
            .to_html_string();
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains(r#"class="title-area with-subtitle""#));
    }

    #[test]
    fn progress_table_builds_badge_urls() {
        let registry = default_registry();
        let progress = ProjectProgress {
            title: "Progress".into(),
            sub_title: None,
            items: vec![
                ProgressItem {
                    name: "vitae".into(),
                    progress: 80,
                    color: Some("00ff00".into()),
                    period: "2025".into(),
                },
                ProgressItem {
                    name: "other".into(),
                    progress: 15,
                    color: None,
                    period: "2024".into(),
                },
            ],
        };

        let html = project_progress_section(
            &progress,
            &project_strings(),
            &EchoTranslator,
            &registry,
        )
        .to_html_string();
        assert!(html.contains("https://progress-bar.xyz/80?progress_color=00ff00"));
        assert!(html.contains(r#"src="https://progress-bar.xyz/15""#));
        assert!(html.contains("<thead><tr><th>Project</th>"));
    }

    #[test]
    fn certification_entries_carry_their_date_twice() {
        let registry = default_registry();
        let certifications = Certifications {
            title: "Certifications".into(),
            duration: None,
            items: vec![CertificationItem {
                name: "Engineer Cert".into(),
                date: "2019-11".into(),
            }],
        };

        let html = certifications_section(&certifications, &EchoTranslator, &registry)
            .to_html_string();
        assert!(html.contains(r#"from="2019-11""#));
        assert!(html.contains(r#"<time class="date">2019-11</time>"#));
    }
}
