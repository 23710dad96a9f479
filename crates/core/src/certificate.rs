use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::session::SessionState;

/// File name offered for the exported certificate.
pub const CERTIFICATE_FILE_NAME: &str = "TechTest_Certificate.svg";

// A4 portrait in millimetres; text rows are centred on the page.
const PAGE_WIDTH_MM: u32 = 210;
const PAGE_HEIGHT_MM: u32 = 297;
const CENTER_X_MM: u32 = 105;
const FONT: &str = r#"font-family="Helvetica, Arial, sans-serif""#;

#[derive(Clone, Copy)]
enum Weight {
    Normal,
    Bold,
}

/// Display values printed on a completion certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    full_name: String,
    subject_label: String,
    percentage_label: String,
    completed_on: Option<NaiveDate>,
}

impl Certificate {
    /// Read the printable fields out of a finished session.
    ///
    /// Returns `None` until the session is completed.
    #[must_use]
    pub fn from_session(state: &SessionState) -> Option<Self> {
        if !state.is_completed() {
            return None;
        }
        let full_name = state.full_name()?.to_owned();
        let subject_label = state.selected_subject()?.label();

        Some(Self {
            full_name,
            subject_label,
            percentage_label: state.score_report().percentage_label(),
            completed_on: state.completed_at().map(|at| at.date_naive()),
        })
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn subject_label(&self) -> &str {
        &self.subject_label
    }

    #[must_use]
    pub fn percentage_label(&self) -> &str {
        &self.percentage_label
    }

    #[must_use]
    pub fn completed_on(&self) -> Option<NaiveDate> {
        self.completed_on
    }

    /// Render a single-page SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut rows: Vec<(u32, f32, Weight, String)> = vec![
            (40, 7.8, Weight::Normal, "Tech Test Certificate".to_string()),
            (60, 5.6, Weight::Normal, "This certifies that".to_string()),
            (70, 7.1, Weight::Bold, self.full_name.clone()),
            (
                85,
                5.6,
                Weight::Normal,
                "has successfully completed the assessment in".to_string(),
            ),
            (95, 7.1, Weight::Bold, self.subject_label.clone()),
            (110, 5.6, Weight::Normal, "with a score of".to_string()),
            (120, 7.1, Weight::Bold, self.percentage_label.clone()),
        ];
        if let Some(date) = self.completed_on {
            rows.push((140, 4.2, Weight::Normal, format!("Issued {}", date.format("%Y-%m-%d"))));
        }

        let mut svg = String::new();
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = write!(svg, r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = write!(svg, r#"width="{PAGE_WIDTH_MM}mm" height="{PAGE_HEIGHT_MM}mm" "#);
        let _ = writeln!(svg, r#"viewBox="0 0 {PAGE_WIDTH_MM} {PAGE_HEIGHT_MM}">"#);
        let _ = write!(svg, r#"  <rect x="0" y="0" width="{PAGE_WIDTH_MM}" "#);
        let _ = writeln!(svg, r#"height="{PAGE_HEIGHT_MM}" fill="white"/>"#);
        for (y, size, weight, text) in rows {
            let weight = match weight {
                Weight::Normal => "normal",
                Weight::Bold => "bold",
            };
            let _ = write!(svg, r#"  <text x="{CENTER_X_MM}" y="{y}" {FONT} "#);
            let _ = write!(svg, r#"font-size="{size}" font-weight="{weight}" "#);
            let _ = writeln!(svg, r#"text-anchor="middle">{}</text>"#, escape_xml(&text));
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
