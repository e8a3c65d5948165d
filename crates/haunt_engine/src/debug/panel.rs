//! Live-tweakable parameter bindings
//!
//! A [`ParameterPanel`] is a registration table: each entry names a field of
//! a shared object, its range and a display label. A UI reads the current
//! value through the panel and writes changes back; the panel keeps no copy
//! of the values themselves.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::debug::PanelError;
use crate::foundation::collections::Shared;
use crate::foundation::math::utils;

/// Value of a panel entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric slider
    Float(f32),
    /// Checkbox
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{:.3}", v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Allowed interval and UI step of a numeric entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
    /// Slider granularity
    pub step: f32,
}

impl ParamRange {
    /// Range `[min, max]` with the given step
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]`
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

enum Accessor {
    Float {
        range: ParamRange,
        get: Box<dyn Fn() -> f32>,
        set: Box<dyn Fn(f32)>,
    },
    Toggle {
        get: Box<dyn Fn() -> bool>,
        set: Box<dyn Fn(bool)>,
    },
}

struct Binding {
    label: String,
    field: String,
    accessor: Accessor,
}

/// Read-only view of one registration
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    /// Display label
    pub label: String,
    /// Name of the bound field
    pub field: String,
    /// Range for numeric entries
    pub range: Option<ParamRange>,
    /// Current value
    pub value: ParamValue,
}

/// Registry of live-editable fields
pub struct ParameterPanel {
    title: String,
    bindings: Vec<Binding>,
}

impl ParameterPanel {
    /// Empty panel
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bindings: Vec::new(),
        }
    }

    /// Panel title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Register a numeric field of a shared object
    pub fn add_float<T: 'static>(
        &mut self,
        label: impl Into<String>,
        target: &Shared<T>,
        field: &str,
        range: ParamRange,
        get: impl Fn(&T) -> f32 + 'static,
        set: impl Fn(&mut T, f32) + 'static,
    ) -> &mut Self {
        let reader = target.clone();
        let writer = target.clone();
        self.push(label.into(), field, Accessor::Float {
            range,
            get: Box::new(move || get(&*reader.borrow())),
            set: Box::new(move |v| set(&mut *writer.borrow_mut(), v)),
        })
    }

    /// Register a boolean field of a shared object
    pub fn add_toggle<T: 'static>(
        &mut self,
        label: impl Into<String>,
        target: &Shared<T>,
        field: &str,
        get: impl Fn(&T) -> bool + 'static,
        set: impl Fn(&mut T, bool) + 'static,
    ) -> &mut Self {
        let reader = target.clone();
        let writer = target.clone();
        self.push(label.into(), field, Accessor::Toggle {
            get: Box::new(move || get(&*reader.borrow())),
            set: Box::new(move |v| set(&mut *writer.borrow_mut(), v)),
        })
    }

    fn push(&mut self, label: String, field: &str, accessor: Accessor) -> &mut Self {
        if self.position(&label).is_some() {
            log::warn!("Panel entry '{}' registered twice; the first one wins lookups", label);
        }
        self.bindings.push(Binding { label, field: field.to_string(), accessor });
        self
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.label == label)
    }

    fn binding(&self, label: &str) -> Result<&Binding, PanelError> {
        self.position(label)
            .map(|i| &self.bindings[i])
            .ok_or_else(|| PanelError::UnknownParameter(label.to_string()))
    }

    /// Current value of an entry
    pub fn read(&self, label: &str) -> Result<ParamValue, PanelError> {
        let binding = self.binding(label)?;
        Ok(match &binding.accessor {
            Accessor::Float { get, .. } => ParamValue::Float(get()),
            Accessor::Toggle { get, .. } => ParamValue::Bool(get()),
        })
    }

    /// Write a value back to the bound object
    ///
    /// Numbers are clamped to the entry's range. Returns the stored value.
    pub fn write(&self, label: &str, value: ParamValue) -> Result<ParamValue, PanelError> {
        let binding = self.binding(label)?;
        match (&binding.accessor, value) {
            (Accessor::Float { range, set, .. }, ParamValue::Float(v)) => {
                if !v.is_finite() {
                    return Err(PanelError::InvalidValue { label: label.to_string(), value });
                }
                let stored = range.clamp(v);
                set(stored);
                log::debug!("Panel: {} = {}", label, stored);
                Ok(ParamValue::Float(stored))
            }
            (Accessor::Toggle { set, .. }, ParamValue::Bool(v)) => {
                set(v);
                log::debug!("Panel: {} = {}", label, v);
                Ok(ParamValue::Bool(v))
            }
            _ => Err(PanelError::InvalidValue { label: label.to_string(), value }),
        }
    }

    /// Move a numeric entry by whole slider steps
    ///
    /// The result lands on the step grid starting at the range minimum.
    pub fn nudge(&self, label: &str, steps: i32) -> Result<ParamValue, PanelError> {
        let binding = self.binding(label)?;
        match &binding.accessor {
            Accessor::Float { range, get, .. } => {
                let moved = get() + steps as f32 * range.step;
                let snapped = utils::snap(moved, range.min, range.step);
                self.write(label, ParamValue::Float(snapped))
            }
            Accessor::Toggle { .. } => Err(PanelError::InvalidValue {
                label: label.to_string(),
                value: ParamValue::Float(steps as f32),
            }),
        }
    }

    /// Apply saved values by label, returning how many were applied
    ///
    /// Unknown labels and mismatched values are logged and skipped.
    pub fn apply_overrides(&self, overrides: &BTreeMap<String, ParamValue>) -> usize {
        overrides
            .iter()
            .filter(|(label, value)| match self.write(label, **value) {
                Ok(_) => true,
                Err(e) => {
                    log::warn!("Skipping panel override: {}", e);
                    false
                }
            })
            .count()
    }

    /// Every entry with its current value, in registration order
    pub fn entries(&self) -> Vec<ParamInfo> {
        self.bindings
            .iter()
            .map(|b| {
                let (range, value) = match &b.accessor {
                    Accessor::Float { range, get, .. } => (Some(*range), ParamValue::Float(get())),
                    Accessor::Toggle { get, .. } => (None, ParamValue::Bool(get())),
                };
                ParamInfo { label: b.label.clone(), field: b.field.clone(), range, value }
            })
            .collect()
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for ParameterPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterPanel")
            .field("title", &self.title)
            .field("entries", &self.bindings.iter().map(|b| &b.label).collect::<Vec<_>>())
            .finish()
    }
}
