//! Inquiry context: why a visitor ended up at the contact form.
//!
//! The context is ephemeral: set by a booking or inquiry affordance, consumed
//! once to pre-fill the form, and cleared by navigation anywhere other than
//! the contact destination.

use serde::{Deserialize, Serialize};

use crate::document::{GalleryEntry, ServicePackage};

/// The reason a visitor reached the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InquiryContext {
  Package { name: String },
  Project { title: String },
  General,
}

/// Top-level destinations presentation can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
  Home,
  Work,
  Services,
  Contact,
  Admin,
}

/// Holds at most one pending [`InquiryContext`].
#[derive(Debug, Default)]
pub struct InquiryTracker {
  context: Option<InquiryContext>,
}

impl InquiryTracker {
  pub fn new() -> Self { Self::default() }

  pub fn book_package(&mut self, package: &ServicePackage) -> Destination {
    self.context = Some(InquiryContext::Package { name: package.name.clone() });
    Destination::Contact
  }

  pub fn inquire_project(&mut self, entry: &GalleryEntry) -> Destination {
    self.context = Some(InquiryContext::Project { title: entry.title.clone() });
    Destination::Contact
  }

  pub fn custom_inquiry(&mut self) -> Destination {
    self.context = Some(InquiryContext::General);
    Destination::Contact
  }

  /// Record a navigation. Anything but the contact destination clears the
  /// pending context; the affordances above navigate to contact themselves.
  pub fn navigate(&mut self, destination: Destination) {
    if destination != Destination::Contact {
      self.context = None;
    }
  }

  pub fn pending(&self) -> Option<&InquiryContext> { self.context.as_ref() }

  /// Consume the pending context.
  pub fn take(&mut self) -> Option<InquiryContext> { self.context.take() }
}

// ─── Form pre-fill ───────────────────────────────────────────────────────────

/// Subject and opening message derived from a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryDraft {
  pub subject: String,
  pub message: String,
}

impl InquiryDraft {
  /// `greeting` is the salutation the message opens with, e.g. `"Hi Liam"`.
  pub fn from_context(context: &InquiryContext, greeting: &str) -> Self {
    match context {
      InquiryContext::Package { name } => Self {
        subject: format!("Inquiry: {name} Package"),
        message: format!(
          "{greeting},\n\nI'm interested in booking the {name} package.\n\nMy project details:\n"
        ),
      },
      InquiryContext::Project { title } => Self {
        subject: format!("Reference: {title}"),
        message: format!(
          "{greeting},\n\nI saw your work on '{title}' and would love something similar for my brand.\n\nHere is what I have in mind:\n"
        ),
      },
      InquiryContext::General => Self {
        subject: "Custom Inquiry".to_owned(),
        message: String::new(),
      },
    }
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// What the visitor typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryForm {
  pub name:    String,
  pub email:   String,
  #[serde(default)]
  pub dates:   String,
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub subject: String,
}

/// The payload posted to the form-relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquirySubmission {
  pub name:     String,
  pub email:    String,
  pub dates:    String,
  pub message:  String,
  #[serde(rename = "_subject")]
  pub subject:  String,
  #[serde(rename = "_template")]
  pub template: String,
}

impl InquirySubmission {
  /// An empty subject falls back to `fallback_subject`.
  pub fn from_form(form: InquiryForm, fallback_subject: &str, template: &str) -> Self {
    let subject = if form.subject.trim().is_empty() {
      fallback_subject.to_owned()
    } else {
      form.subject
    };
    Self {
      name: form.name,
      email: form.email,
      dates: form.dates,
      message: form.message,
      subject,
      template: template.to_owned(),
    }
  }
}
