//! Configuration system for the chart tooltip
//! Declarative options, callable option variants, parsing and validation

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_types::TooltipPosition;

pub mod callbacks;
pub mod parser;
pub mod validation;

pub use callbacks::{
    ColorResolver, Comparator, ContentArgs, ContentRenderer, FormatArgs, Hook, LevelColor,
    NameFormatter, PositionArgs, PositionResolver, TitleFormatter, ValueFormatter,
};
pub use parser::{ConfigFormat, ConfigParser};
pub use validation::ConfigValidator;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Row ordering policy
#[derive(Clone, Default)]
pub enum TooltipOrder {
    /// Declaration order, or visual stack order when the chart groups series
    #[default]
    Declaration,
    Asc,
    Desc,
    Compare(Comparator),
}

impl fmt::Debug for TooltipOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TooltipOrder::Declaration => write!(f, "Declaration"),
            TooltipOrder::Asc => write!(f, "Asc"),
            TooltipOrder::Desc => write!(f, "Desc"),
            TooltipOrder::Compare(_) => write!(f, "Compare(<fn>)"),
        }
    }
}

impl FromStr for TooltipOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(TooltipOrder::Asc),
            "desc" => Ok(TooltipOrder::Desc),
            _ => Err(ConfigError::Validation(format!(
                "Invalid order: {s}. Must be \"asc\" or \"desc\""
            ))),
        }
    }
}

/// Template-based contents, optionally bound to an external container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateContents {
    /// Selector of a pre-existing element that receives the tooltip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindto: Option<String>,
    /// Custom template with a single `{{...}}` row block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Auxiliary per-row text, keyed by placeholder name then row position
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub text: BTreeMap<String, Vec<String>>,
}

/// Content generation policy
#[derive(Clone, Default)]
pub enum ContentsOption {
    #[default]
    Default,
    Template(TemplateContents),
    Custom(ContentRenderer),
}

impl ContentsOption {
    pub fn bindto(&self) -> Option<&str> {
        match self {
            ContentsOption::Template(t) => t.bindto.as_deref(),
            _ => None,
        }
    }

    pub fn template(&self) -> Option<&str> {
        match self {
            ContentsOption::Template(t) => t.template.as_deref(),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ContentsOption::Template(t) if !t.text.is_empty() => Some(&t.text),
            _ => None,
        }
    }
}

impl fmt::Debug for ContentsOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentsOption::Default => write!(f, "Default"),
            ContentsOption::Template(t) => f.debug_tuple("Template").field(t).finish(),
            ContentsOption::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

/// Placement policy
#[derive(Clone, Default)]
pub enum PositionOption {
    #[default]
    Default,
    Custom(PositionResolver),
}

impl fmt::Debug for PositionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionOption::Default => write!(f, "Default"),
            PositionOption::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

/// Formatter overrides
#[derive(Clone, Default)]
pub struct FormatOptions {
    pub title: Option<TitleFormatter>,
    pub name: Option<NameFormatter>,
    pub value: Option<ValueFormatter>,
}

impl fmt::Debug for FormatOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatOptions")
            .field("title", &self.title.is_some())
            .field("name", &self.name.is_some())
            .field("value", &self.value.is_some())
            .finish()
    }
}

/// Lifecycle events a hook can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Show,
    Shown,
    Hide,
    Hidden,
}

#[derive(Clone, Default)]
pub struct LifecycleHooks {
    pub onshow: Option<Hook>,
    pub onshown: Option<Hook>,
    pub onhide: Option<Hook>,
    pub onhidden: Option<Hook>,
}

impl LifecycleHooks {
    pub fn fire(&self, event: LifecycleEvent) {
        let hook = match event {
            LifecycleEvent::Show => &self.onshow,
            LifecycleEvent::Shown => &self.onshown,
            LifecycleEvent::Hide => &self.onhide,
            LifecycleEvent::Hidden => &self.onhidden,
        };

        if let Some(hook) = hook {
            hook();
        }
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("onshow", &self.onshow.is_some())
            .field("onshown", &self.onshown.is_some())
            .field("onhide", &self.onhide.is_some())
            .field("onhidden", &self.onhidden.is_some())
            .finish()
    }
}

/// Cross-instance synchronization group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedOptions {
    pub enabled: bool,
    pub name: String,
}

/// `linked: true` or `linked: { name: "group" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkedSetting {
    Flag(bool),
    Named { name: String },
}

impl From<LinkedSetting> for LinkedOptions {
    fn from(setting: LinkedSetting) -> Self {
        match setting {
            LinkedSetting::Flag(enabled) => LinkedOptions {
                enabled,
                name: String::new(),
            },
            LinkedSetting::Named { name } => LinkedOptions {
                enabled: true,
                name,
            },
        }
    }
}

/// X position of the initial tooltip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitX {
    Index(usize),
    /// Time string matched against the first series of a time-series chart
    Time(String),
}

impl Default for InitX {
    fn default() -> Self {
        InitX::Index(0)
    }
}

/// CSS offsets of the initial tooltip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitPosition {
    pub top: String,
    pub left: String,
}

impl Default for InitPosition {
    fn default() -> Self {
        Self {
            top: "0px".to_string(),
            left: "50px".to_string(),
        }
    }
}

/// Tooltip rendered at startup without a pointer event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitOptions {
    #[serde(default)]
    pub show: bool,
    #[serde(default)]
    pub x: InitX,
    #[serde(default)]
    pub position: InitPosition,
}

/// Declarative subset of the tooltip configuration, as read from files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    #[serde(default = "default_true")]
    pub show: bool,
    #[serde(default)]
    pub do_not_hide: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<TemplateContents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked: Option<LinkedSetting>,
    #[serde(default)]
    pub init: InitOptions,
}

fn default_true() -> bool {
    true
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            show: true,
            do_not_hide: false,
            order: None,
            contents: None,
            linked: None,
            init: InitOptions::default(),
        }
    }
}

/// Complete tooltip configuration
#[derive(Debug, Clone)]
pub struct TooltipConfig {
    /// Globally enables tooltip display
    pub show: bool,
    /// Suppresses auto-hide; only a forced hide takes effect
    pub do_not_hide: bool,
    pub order: TooltipOrder,
    pub format: FormatOptions,
    pub contents: ContentsOption,
    pub position: PositionOption,
    pub hooks: LifecycleHooks,
    pub linked: LinkedOptions,
    pub init: InitOptions,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show: true,
            do_not_hide: false,
            order: TooltipOrder::default(),
            format: FormatOptions::default(),
            contents: ContentsOption::default(),
            position: PositionOption::default(),
            hooks: LifecycleHooks::default(),
            linked: LinkedOptions::default(),
            init: InitOptions::default(),
        }
    }
}

impl TooltipConfig {
    /// Build a validated configuration from declarative options
    pub fn from_options(options: TooltipOptions) -> Result<Self> {
        let order = match options.order.as_deref() {
            None => TooltipOrder::Declaration,
            Some(keyword) => keyword.parse()?,
        };

        let config = Self {
            show: options.show,
            do_not_hide: options.do_not_hide,
            order,
            contents: options
                .contents
                .map(ContentsOption::Template)
                .unwrap_or_default(),
            linked: options.linked.map(LinkedOptions::from).unwrap_or_default(),
            init: options.init,
            ..Self::default()
        };

        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    pub fn with_order(mut self, order: TooltipOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_comparator<F>(self, compare: F) -> Self
    where
        F: Fn(Option<&shared_types::DataPoint>, Option<&shared_types::DataPoint>) -> std::cmp::Ordering
            + 'static,
    {
        self.with_order(TooltipOrder::Compare(Rc::new(compare)))
    }

    pub fn with_title_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&shared_types::XValue) -> Option<String> + 'static,
    {
        self.format.title = Some(Rc::new(format));
        self
    }

    pub fn with_name_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&str, &FormatArgs<'_>) -> String + 'static,
    {
        self.format.name = Some(Rc::new(format));
        self
    }

    pub fn with_value_format<F>(mut self, format: F) -> Self
    where
        F: Fn(f64, &FormatArgs<'_>) -> Option<String> + 'static,
    {
        self.format.value = Some(Rc::new(format));
        self
    }

    pub fn with_template(mut self, contents: TemplateContents) -> Self {
        self.contents = ContentsOption::Template(contents);
        self
    }

    pub fn with_contents<F>(mut self, render: F) -> Self
    where
        F: Fn(&ContentArgs<'_>) -> String + 'static,
    {
        self.contents = ContentsOption::Custom(Rc::new(render));
        self
    }

    pub fn with_position<F>(mut self, position: F) -> Self
    where
        F: Fn(&PositionArgs<'_>) -> TooltipPosition + 'static,
    {
        self.position = PositionOption::Custom(Rc::new(position));
        self
    }

    pub fn with_hook<F>(mut self, event: LifecycleEvent, hook: F) -> Self
    where
        F: Fn() + 'static,
    {
        let hook: Hook = Rc::new(hook);
        match event {
            LifecycleEvent::Show => self.hooks.onshow = Some(hook),
            LifecycleEvent::Shown => self.hooks.onshown = Some(hook),
            LifecycleEvent::Hide => self.hooks.onhide = Some(hook),
            LifecycleEvent::Hidden => self.hooks.onhidden = Some(hook),
        }
        self
    }

    pub fn with_linked(mut self, name: impl Into<String>) -> Self {
        self.linked = LinkedOptions {
            enabled: true,
            name: name.into(),
        };
        self
    }
}
