use std::fmt::Display;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use log::{debug, info};
use serde::{Serialize, Serializer};

use super::error::{Result, StoreError};
use super::identifiers::{Id, Kennitala};

/// The closed set of kinds a column may hold.
///
/// Every kind has a type name that goes into the first line of a table
/// file. The names are the ones older files were written with, so they
/// are not derived from the variant names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Id,
    Kennitala,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 7] = [
        ColumnKind::Text,
        ColumnKind::Integer,
        ColumnKind::Float,
        ColumnKind::Boolean,
        ColumnKind::Timestamp,
        ColumnKind::Id,
        ColumnKind::Kennitala,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnKind::Text => "str",
            ColumnKind::Integer => "int",
            ColumnKind::Float => "float",
            ColumnKind::Boolean => "bool",
            ColumnKind::Timestamp => "datetime",
            ColumnKind::Id => "ID",
            ColumnKind::Kennitala => "Kennitala",
        }
    }

    pub fn from_type_name(name: &str) -> Result<ColumnKind> {
        //! Parse a header type name back into its kind.

        ColumnKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
            .ok_or_else(|| StoreError::UnknownColumnKind(name.to_string()))
    }

    pub fn default_value(&self) -> Value {
        //! The value a fresh column of this kind starts out with. Timestamps
        //! start at the current local time and ids get a fresh UUID.

        match self {
            ColumnKind::Text => Value::Text(String::new()),
            ColumnKind::Integer => Value::Integer(0),
            ColumnKind::Float => Value::Float(0.0),
            ColumnKind::Boolean => Value::Boolean(false),
            ColumnKind::Timestamp => Value::Timestamp(chrono::Local::now().naive_local()),
            ColumnKind::Id => Value::Id(Id::new()),
            ColumnKind::Kennitala => Value::Kennitala(Kennitala::default()),
        }
    }
}

impl Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Kinds serialize as their header type name.
impl Serialize for ColumnKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

/// A single scalar held by a [`Column`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Id(Id),
    Kennitala(Kennitala),
}

impl Value {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Text(_) => ColumnKind::Text,
            Value::Integer(_) => ColumnKind::Integer,
            Value::Float(_) => ColumnKind::Float,
            Value::Boolean(_) => ColumnKind::Boolean,
            Value::Timestamp(_) => ColumnKind::Timestamp,
            Value::Id(_) => ColumnKind::Id,
            Value::Kennitala(_) => ColumnKind::Kennitala,
        }
    }

    pub fn coerce(&self, target: ColumnKind) -> Result<Value> {
        //! Convert the value into `target`.
        //!
        //! Timestamps can only be rebuilt from their comma separated
        //! constructable form. Every other kind is built from whatever the
        //! current value naturally converts to.

        if self.kind() == target {
            return Ok(self.clone());
        }

        let fail = |reason: String| StoreError::Coercion {
            value: self.to_string(),
            target,
            reason,
        };

        match (target, self) {
            (ColumnKind::Timestamp, Value::Text(text)) => parse_timestamp(text).map(Value::Timestamp),
            (ColumnKind::Timestamp, _) => Err(fail(format!("expected text, got {}", self.kind()))),

            (ColumnKind::Text, _) => Ok(Value::Text(self.to_string())),
            (ColumnKind::Id, _) => Ok(Value::Id(Id::from(self.to_string()))),
            (ColumnKind::Kennitala, _) => Ok(Value::Kennitala(Kennitala::from(self.to_string()))),

            (ColumnKind::Integer, Value::Float(number)) => {
                if number.is_finite() {
                    Ok(Value::Integer(number.trunc() as i64))
                } else {
                    Err(fail("not a finite number".to_string()))
                }
            }
            (ColumnKind::Integer, Value::Boolean(flag)) => Ok(Value::Integer(*flag as i64)),
            (ColumnKind::Integer, Value::Timestamp(_)) => Err(fail("timestamps are not numbers".to_string())),
            (ColumnKind::Integer, _) => self
                .to_string()
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| fail(e.to_string())),

            (ColumnKind::Float, Value::Integer(number)) => Ok(Value::Float(*number as f64)),
            (ColumnKind::Float, Value::Boolean(flag)) => Ok(Value::Float(if *flag { 1.0 } else { 0.0 })),
            (ColumnKind::Float, Value::Timestamp(_)) => Err(fail("timestamps are not numbers".to_string())),
            (ColumnKind::Float, _) => self
                .to_string()
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| fail(e.to_string())),

            (ColumnKind::Boolean, Value::Text(text)) => match text.trim() {
                "True" | "true" | "1" => Ok(Value::Boolean(true)),
                "False" | "false" | "0" | "" => Ok(Value::Boolean(false)),
                _ => Err(fail("expected True or False".to_string())),
            },
            (ColumnKind::Boolean, Value::Integer(number)) => Ok(Value::Boolean(*number != 0)),
            (ColumnKind::Boolean, Value::Float(number)) => Ok(Value::Boolean(*number != 0.0)),
            (ColumnKind::Boolean, _) => Err(fail(format!("{} has no truth value", self.kind()))),
        }
    }
}

/// The plain string form of a value.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{}", text),
            Value::Integer(number) => write!(f, "{}", number),
            Value::Float(number) => write!(f, "{}", float_string(*number)),
            Value::Boolean(true) => write!(f, "True"),
            Value::Boolean(false) => write!(f, "False"),
            Value::Timestamp(stamp) => {
                write!(f, "{}", stamp.format("%Y-%m-%d %H:%M:%S"))?;
                let micros = stamp.nanosecond() / 1_000;
                if micros != 0 {
                    write!(f, ".{:06}", micros)?;
                }
                Ok(())
            }
            Value::Id(id) => write!(f, "{}", id),
            Value::Kennitala(kennitala) => write!(f, "{}", kennitala),
        }
    }
}

/// A single typed cell in a [`super::Row`].
///
/// The column never validates what it is given: the kind of a column is
/// simply the kind of whatever value it currently holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    value: Value,
}

impl Column {
    pub fn new(value: impl Into<Value>) -> Column {
        Column {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    pub fn kind(&self) -> ColumnKind {
        self.value.kind()
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn set_type(&mut self, target: ColumnKind) -> Result<()> {
        //! Coerce the held value into `target` in place. Nothing changes
        //! if the column already holds that kind or if the coercion fails.

        info!(
            "setting type: value = {:?}, target = {}",
            self.value, target
        );

        if target == self.kind() {
            return Ok(());
        }
        if target != ColumnKind::Timestamp {
            debug!("not a timestamp");
        }

        self.value = self.value.coerce(target)?;
        Ok(())
    }

    pub fn constructable(&self) -> String {
        //! The form written to table files and read back by
        //! [`Column::set_type`]. Timestamps become seven comma separated
        //! fields, everything else its plain string form.

        match &self.value {
            Value::Timestamp(stamp) => format!(
                "{},{},{},{},{},{},{}",
                stamp.year(),
                stamp.month(),
                stamp.day(),
                stamp.hour(),
                stamp.minute(),
                stamp.second(),
                stamp.nanosecond() / 1_000
            ),
            other => other.to_string(),
        }
    }

    pub fn am_compatible(&self) -> Value {
        //! Booleans and timestamps pass through untouched, everything else
        //! is handed over as text.

        match &self.value {
            Value::Boolean(_) | Value::Timestamp(_) => self.value.clone(),
            other => Value::Text(other.to_string()),
        }
    }

    pub fn display(&self) -> String {
        //! Human facing form. Timestamps only show their date.

        match &self.value {
            Value::Timestamp(stamp) => stamp.date().to_string(),
            other => other.to_string(),
        }
    }

    pub fn width(&self) -> usize {
        self.display().chars().count()
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<Value> for Column {
    fn from(value: Value) -> Self {
        Column { value }
    }
}

macro_rules! impl_value_from {
    ($($source:ty => |$v:ident| $build:expr),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from($v: $source) -> Self {
                    $build
                }
            }

            impl From<$source> for Column {
                fn from(value: $source) -> Self {
                    Column::new(value)
                }
            }
        )*
    };
}

impl_value_from! {
    &str => |v| Value::Text(v.to_string()),
    String => |v| Value::Text(v),
    i32 => |v| Value::Integer(v as i64),
    i64 => |v| Value::Integer(v),
    f64 => |v| Value::Float(v),
    bool => |v| Value::Boolean(v),
    NaiveDateTime => |v| Value::Timestamp(v),
    Id => |v| Value::Id(v),
    Kennitala => |v| Value::Kennitala(v),
}

fn float_string(number: f64) -> String {
    let text = number.to_string();
    if number.is_finite() && !text.contains(['.', 'e']) {
        format!("{}.0", text)
    } else {
        text
    }
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let fail = |reason: &str| StoreError::Coercion {
        value: text.to_string(),
        target: ColumnKind::Timestamp,
        reason: reason.to_string(),
    };

    let fields = text
        .split(',')
        .map(|field| field.trim().parse::<i64>())
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(|e| fail(&e.to_string()))?;

    if !(3..=7).contains(&fields.len()) {
        return Err(fail("expected 3 to 7 comma separated fields"));
    }

    let year = i32::try_from(fields[0]).map_err(|_| fail("year out of range"))?;
    let field = |index: usize| {
        u32::try_from(fields.get(index).copied().unwrap_or(0))
            .map_err(|_| fail("fields cannot be negative"))
    };
    let micros = field(6)?;

    NaiveDate::from_ymd_opt(year, field(1)?, field(2)?)
        .and_then(|date| date.and_hms_micro_opt(field(3).ok()?, field(4).ok()?, field(5).ok()?, micros))
        .ok_or_else(|| fail("field out of range"))
}
