//! HTML rendering with Tera.
//!
//! Templates are compiled into the binary and parsed once at start-up.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use serde::Serialize;
use tera::{Context, Tera};

use quill_shared::{FieldSpec, FormErrors, FormSchema, Widget};

use crate::flash::IncomingFlash;
use crate::middleware::error::{AppError, AppResult};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("category/index.html", include_str!("../templates/category/index.html")),
    ("category/form.html", include_str!("../templates/category/form.html")),
    ("post/form.html", include_str!("../templates/post/form.html")),
];

/// Standalone error page, rendered without the layout so that it works even
/// when the shared templates are unavailable.
pub const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Compiled page templates.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        tracing::debug!(count = TEMPLATES.len(), "Templates loaded");
        Ok(Self { tera })
    }

    /// Render a full page, draining the incoming flash messages into it.
    pub fn page(
        &self,
        name: &str,
        mut context: Context,
        flash: IncomingFlash,
        status: StatusCode,
    ) -> AppResult<HttpResponse> {
        let mut res = HttpResponse::build(status);
        context.insert("flashes", &flash.drain_into(&mut res));

        let body = self.tera.render(name, &context).map_err(|e| {
            AppError::Internal(format!("rendering {} failed: {:?}", name, e))
        })?;

        Ok(res.content_type(ContentType::html()).body(body))
    }
}

/// One `<option>` of a select widget.
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A field ready for the form template.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    #[serde(flatten)]
    pub spec: FieldSpec,
    pub value: String,
    pub errors: Vec<String>,
    pub choices: Vec<Choice>,
}

/// A bound form: schema, submitted or prefilled values and errors.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub action: String,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
    pub has_errors: bool,
}

impl FormView {
    pub fn new<F: FormSchema>(action: impl Into<String>, form: &F, errors: &FormErrors) -> Self {
        let fields = F::FIELDS
            .iter()
            .map(|spec| FieldView {
                spec: *spec,
                value: form.value(spec.name).to_string(),
                errors: errors.get(spec.name).to_vec(),
                choices: Vec::new(),
            })
            .collect();

        Self {
            action: action.into(),
            submit_label: F::SUBMIT_LABEL,
            fields,
            has_errors: !errors.is_empty(),
        }
    }

    /// Fill the options of a select field, marking the current value.
    pub fn with_choices<I>(mut self, field: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if let Some(view) = self
            .fields
            .iter_mut()
            .find(|f| f.spec.name == field && f.spec.widget == Widget::Select)
        {
            view.choices = choices
                .into_iter()
                .map(|(value, label)| Choice {
                    selected: value == view.value,
                    value,
                    label,
                })
                .collect();
        }
        self
    }
}
