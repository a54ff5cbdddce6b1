//! Two-slot tooltip templates and placeholder substitution

use once_cell::sync::Lazy;
use regex::Regex;

/// CSS class hooks emitted into tooltip markup
pub mod classes {
    pub const TOOLTIP: &str = "chart-tooltip";
    pub const TOOLTIP_NAME: &str = "chart-tooltip-name";
    pub const TOOLTIP_CONTAINER: &str = "chart-tooltip-container";
}

/// Suffix appended to every built tooltip
pub const TABLE_CLOSE: &str = "</table>";

const DEFAULT_TEMPLATE: &str = concat!(
    "<table class=\"{=CLASS_TOOLTIP}\"><tbody>\n",
    "\t\t{=TITLE}\n",
    "\t\t{{<tr class=\"{=CLASS_TOOLTIP_NAME}\">\n",
    "\t\t\t<td class=\"name\">{=COLOR}{=NAME}</td>\n",
    "\t\t\t<td class=\"value\">{=VALUE}</td>\n",
    "\t\t</tr>}}\n",
    "\t</tbody></table>",
);

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\r?\n|\t)").unwrap());
static ROW_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.*)\}\}").unwrap());
static SELECTOR_UNSAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\s?!@#$%^&*()_=+,.<>'":;\[\]/|~`{}\\]"#).unwrap());

/// A template split into its title segment and repeating row segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipTemplate {
    pub title: String,
    pub row: String,
}

impl TooltipTemplate {
    /// Split a custom template, or the default one, around its `{{...}}` row block.
    /// Markup after the row block is dropped; builders close with [`TABLE_CLOSE`].
    pub fn parse(custom: Option<&str>) -> Self {
        let source = LINE_BREAKS.replace_all(custom.unwrap_or(DEFAULT_TEMPLATE), "");

        match ROW_BLOCK.captures(&source) {
            Some(caps) => {
                let whole = caps.get(0).map_or(0..0, |m| m.range());
                Self {
                    title: source[..whole.start].to_string(),
                    row: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                }
            }
            None => Self {
                title: source.to_string(),
                row: String::new(),
            },
        }
    }
}

/// Replace every `{=KEY}` placeholder, in the given key order
pub fn tpl_process(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{={key}}}"), value)
    })
}

/// Escape angle brackets so formatted values cannot inject markup
pub fn sanitise(input: &str) -> String {
    input.replace('<', "&lt;").replace('>', "&gt;")
}

/// Class suffix derived from a series id, safe for use in selectors
pub fn target_selector_suffix(id: &str) -> String {
    if id.is_empty() {
        return String::new();
    }
    SELECTOR_UNSAFE.replace_all(&format!("-{id}"), "-").into_owned()
}
