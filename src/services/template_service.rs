//! HTML page rendering backed by Tera.
//!
//! Templates are compiled into the binary so the server does not depend on
//! its working directory. Files ending in `.html` are autoescaped.

use crate::{
    forms::bug_form::BugFormContext,
    models::bug::{Bug, BugStatus, BugType},
};
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    (
        "bug_register.html",
        include_str!("../../templates/bug_register.html"),
    ),
    (
        "bug_detail.html",
        include_str!("../../templates/bug_detail.html"),
    ),
];

/// A bug plus the display labels for its choice fields.
#[derive(Serialize, Debug)]
pub struct BugView<'a> {
    #[serde(flatten)]
    pub bug: &'a Bug,
    pub bug_type_display: &'static str,
    pub status_display: &'static str,
}

impl<'a> From<&'a Bug> for BugView<'a> {
    fn from(bug: &'a Bug) -> Self {
        Self {
            bug,
            bug_type_display: BugType::label(bug.bug_type),
            status_display: BugStatus::label(bug.status),
        }
    }
}

#[derive(Clone)]
pub struct TemplateService {
    tera: Arc<Tera>,
}

impl TemplateService {
    /// Compile the embedded templates.
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// `index.html` with every bug.
    pub fn render_index(&self, bugs: &[Bug]) -> tera::Result<String> {
        let views: Vec<BugView<'_>> = bugs.iter().map(BugView::from).collect();
        let mut ctx = Context::new();
        ctx.insert("bug_list", &views);
        self.tera.render("index.html", &ctx)
    }

    /// `bug_register.html`, either empty or bound to a failed submission.
    pub fn render_register(&self, form: &BugFormContext) -> tera::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("form", form);
        self.tera.render("bug_register.html", &ctx)
    }

    pub fn render_detail(&self, bug: &Bug) -> tera::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("bug", &BugView::from(bug));
        self.tera.render("bug_detail.html", &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::bug_form::BugForm;
    use chrono::NaiveDate;

    fn bug(id: i64, description: &str) -> Bug {
        Bug {
            id,
            description: description.into(),
            bug_type: BugType::NewFeature,
            report_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            status: BugStatus::InProgress,
        }
    }

    #[test]
    fn index_links_each_bug() {
        let templates = TemplateService::new().unwrap();
        let html = templates
            .render_index(&[bug(1, "first"), bug(2, "second")])
            .unwrap();
        assert!(html.contains("href=\"/bug/1/\""));
        assert!(html.contains("second"));
    }

    #[test]
    fn empty_index_renders_placeholder() {
        let templates = TemplateService::new().unwrap();
        let html = templates.render_index(&[]).unwrap();
        assert!(html.contains("No bugs reported yet."));
    }

    #[test]
    fn detail_shows_labels_and_date() {
        let templates = TemplateService::new().unwrap();
        let html = templates.render_detail(&bug(3, "detail me")).unwrap();
        assert!(html.contains("New Feature"));
        assert!(html.contains("In Progress"));
        assert!(html.contains("2023-10-01"));
    }

    #[test]
    fn descriptions_are_escaped() {
        let templates = TemplateService::new().unwrap();
        let html = templates
            .render_detail(&bug(4, "<script>alert(1)</script>"))
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn bound_form_reselects_choice_and_shows_errors() {
        let templates = TemplateService::new().unwrap();
        let submitted = BugForm {
            description: None,
            bug_type: Some("enhancement".into()),
            report_date: Some("2023-10-02".into()),
            status: Some("done".into()),
        };
        let errors = submitted.validate().unwrap_err();
        let html = templates
            .render_register(&BugFormContext::bound(submitted, errors))
            .unwrap();
        assert!(html.contains("<option value=\"enhancement\" selected>"));
        assert!(html.contains("value=\"2023-10-02\""));
        assert!(html.contains("This field is required."));
    }
}
