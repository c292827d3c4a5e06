use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of placeable widget kinds. `Unknown` is never placeable; it is
/// what an unrecognized kind in a persisted blob deserializes to, and it
/// renders as a visible error placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Button,
    Slider,
    Label,
    Led,
    Unknown,
}

impl<'de> Deserialize<'de> for WidgetKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "button" => Self::Button,
            "slider" => Self::Slider,
            "label" => Self::Label,
            "led" => Self::Led,
            other => {
                tracing::warn!(kind = %other, "unknown widget kind in stored data");
                Self::Unknown
            }
        })
    }
}

impl WidgetKind {
    pub const PLACEABLE: [WidgetKind; 4] = [
        WidgetKind::Button,
        WidgetKind::Slider,
        WidgetKind::Label,
        WidgetKind::Led,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::Slider => "Slider",
            Self::Label => "Label",
            Self::Led => "LED",
            Self::Unknown => "Unknown",
        }
    }

    /// Button and slider transmit; label and LED are receive-only.
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::Slider)
    }
}

/// When an interactive widget transmits. Terminals collapse a button click
/// into a single gesture, so for buttons every strategy fires on that click;
/// sliders distinguish per-step (`OnChange`) from gesture-end (`OnRelease`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SendStrategy {
    OnRelease,
    OnChange,
    OnPress,
}

impl SendStrategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::OnRelease => "onRelease",
            Self::OnChange => "onChange",
            Self::OnPress => "onPress",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "onrelease" | "release" => Some(Self::OnRelease),
            "onchange" | "change" => Some(Self::OnChange),
            "onpress" | "press" => Some(Self::OnPress),
            _ => None,
        }
    }
}

/// Display color override. The canvas is made of terminal cells, so the
/// palette is a closed set rather than free-form hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl WidgetColor {
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::White => "white",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            "yellow" => Some(Self::Yellow),
            "cyan" => Some(Self::Cyan),
            "magenta" => Some(Self::Magenta),
            "white" => Some(Self::White),
            _ => None,
        }
    }
}

/// Canvas position in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

pub const SLIDER_DEFAULT_MIN: i64 = 0;
pub const SLIDER_DEFAULT_MAX: i64 = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProps {
    pub label: String,
    /// Target I/O line on the device ("13", "A0"). Free-form and opaque; an
    /// empty pin makes the widget inert (it never transmits).
    pub pin: String,
    /// Current/initial state: slider value, LED on/off. Kept as a string to
    /// match the wire format.
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WidgetColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_strategy: Option<SendStrategy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub position: Position,
    #[serde(rename = "properties")]
    pub props: WidgetProps,
}

impl Widget {
    /// Fresh widget with the defaults a toolbar placement gets.
    pub fn new(kind: WidgetKind, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            props: WidgetProps {
                label: kind.label().to_string(),
                pin: "13".to_string(),
                value: "0".to_string(),
                min: None,
                max: None,
                color: None,
                send_strategy: None,
            },
        }
    }

    pub fn slider_bounds(&self) -> (i64, i64) {
        let min = self.props.min.unwrap_or(SLIDER_DEFAULT_MIN);
        let max = self.props.max.unwrap_or(SLIDER_DEFAULT_MAX);
        if max < min {
            (min, min)
        } else {
            (min, max)
        }
    }

    pub fn slider_value(&self) -> i64 {
        let (min, max) = self.slider_bounds();
        self.props
            .value
            .trim()
            .parse::<i64>()
            .unwrap_or(min)
            .clamp(min, max)
    }

    pub fn send_strategy(&self) -> SendStrategy {
        self.props.send_strategy.unwrap_or(SendStrategy::OnChange)
    }
}

/// Truthiness of a wire value, used for LED state ("1" = on).
pub fn value_is_on(value: &str) -> bool {
    value.trim() == "1"
}

/// Partial update over [`WidgetProps`]; `Some` fields overwrite, `None`
/// fields are untouched. The outer/inner split on optional props lets a
/// patch clear them (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct WidgetPatch {
    pub label: Option<String>,
    pub pin: Option<String>,
    pub value: Option<String>,
    pub min: Option<Option<i64>>,
    pub max: Option<Option<i64>>,
    pub color: Option<Option<WidgetColor>>,
    pub send_strategy: Option<Option<SendStrategy>>,
}

impl WidgetPatch {
    pub fn label(value: impl Into<String>) -> Self {
        Self {
            label: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn pin(value: impl Into<String>) -> Self {
        Self {
            pin: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn min(value: Option<i64>) -> Self {
        Self {
            min: Some(value),
            ..Self::default()
        }
    }

    pub fn max(value: Option<i64>) -> Self {
        Self {
            max: Some(value),
            ..Self::default()
        }
    }

    pub fn color(value: Option<WidgetColor>) -> Self {
        Self {
            color: Some(value),
            ..Self::default()
        }
    }

    pub fn send_strategy(value: Option<SendStrategy>) -> Self {
        Self {
            send_strategy: Some(value),
            ..Self::default()
        }
    }

    /// Applies the patch; returns whether anything changed.
    pub fn apply(&self, props: &mut WidgetProps) -> bool {
        let mut changed = false;
        if let Some(label) = &self.label {
            if props.label != *label {
                props.label = label.clone();
                changed = true;
            }
        }
        if let Some(pin) = &self.pin {
            if props.pin != *pin {
                props.pin = pin.clone();
                changed = true;
            }
        }
        if let Some(value) = &self.value {
            if props.value != *value {
                props.value = value.clone();
                changed = true;
            }
        }
        if let Some(min) = self.min {
            if props.min != min {
                props.min = min;
                changed = true;
            }
        }
        if let Some(max) = self.max {
            if props.max != max {
                props.max = max;
                changed = true;
            }
        }
        if let Some(color) = self.color {
            if props.color != color {
                props.color = color;
                changed = true;
            }
        }
        if let Some(strategy) = self.send_strategy {
            if props.send_strategy != strategy {
                props.send_strategy = strategy;
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/widget.rs"]
mod tests;
