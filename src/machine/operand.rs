//! Typed operand values with bounds-checked construction and promotion arithmetic

use std::fmt;

use crate::error::{OperandError, OperandResult};

/// Operand kinds ordered by precision
///
/// The declaration order is the precision hierarchy: `Int8 < Int16 < Int32 <
/// Float < Double`. Arithmetic between two kinds produces the higher-ranked
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperandKind {
    /// 8-bit signed integer (lowest precision)
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// Single-precision float
    Float,
    /// Double-precision float (highest precision)
    Double,
}

impl OperandKind {
    /// All kinds in precision order
    pub const ALL: [OperandKind; 5] = [
        OperandKind::Int8,
        OperandKind::Int16,
        OperandKind::Int32,
        OperandKind::Float,
        OperandKind::Double,
    ];

    /// Precision rank of this kind (0 for Int8 up to 4 for Double)
    pub fn precision(&self) -> u8 {
        *self as u8
    }

    /// Keyword name of this kind in program text
    pub fn name(&self) -> &'static str {
        match self {
            OperandKind::Int8 => "int8",
            OperandKind::Int16 => "int16",
            OperandKind::Int32 => "int32",
            OperandKind::Float => "float",
            OperandKind::Double => "double",
        }
    }

    /// Minimum representable value, in the extended intermediate
    pub fn min(&self) -> f64 {
        match self {
            OperandKind::Int8 => i8::MIN as f64,
            OperandKind::Int16 => i16::MIN as f64,
            OperandKind::Int32 => i32::MIN as f64,
            OperandKind::Float => f32::MIN as f64,
            OperandKind::Double => f64::MIN,
        }
    }

    /// Maximum representable value, in the extended intermediate
    pub fn max(&self) -> f64 {
        match self {
            OperandKind::Int8 => i8::MAX as f64,
            OperandKind::Int16 => i16::MAX as f64,
            OperandKind::Int32 => i32::MAX as f64,
            OperandKind::Float => f32::MAX as f64,
            OperandKind::Double => f64::MAX,
        }
    }

    /// Whether this kind holds integer values
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            OperandKind::Int8 | OperandKind::Int16 | OperandKind::Int32
        )
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Arithmetic operators over operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Modulo (floating remainder, sign follows the dividend)
    Mod,
}

impl ArithOp {
    /// Instruction keyword for this operator
    pub fn name(&self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::Div => "div",
            ArithOp::Mod => "mod",
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single immutable typed numeric value
///
/// Operands are created once through the bounds-checked factory and moved,
/// never mutated, between the stack, pending instructions, and temporary
/// results. Arithmetic produces newly constructed operands through the same
/// factory path, so overflow and underflow surface identically to
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// 8-bit signed integer value
    Int8(i8),
    /// 16-bit signed integer value
    Int16(i16),
    /// 32-bit signed integer value
    Int32(i32),
    /// Single-precision float value
    Float(f32),
    /// Double-precision float value
    Double(f64),
}

impl Operand {
    /// Create an operand of the given kind from a text literal
    ///
    /// The text is parsed into the extended intermediate and checked against
    /// the kind's inclusive bounds. Integer kinds truncate any fractional
    /// part toward zero after the check.
    pub fn new(kind: OperandKind, text: &str) -> OperandResult<Operand> {
        let value = parse_numeric(text)?;
        check_bounds(kind, value, text)?;
        Ok(Operand::construct(kind, value))
    }

    /// Create an operand of the given kind from an intermediate value
    ///
    /// This is the arithmetic result path; it applies the same bounds check
    /// as construction from text.
    pub fn from_numeric(kind: OperandKind, value: f64) -> OperandResult<Operand> {
        check_bounds(kind, value, &render_numeric(value))?;
        Ok(Operand::construct(kind, value))
    }

    fn construct(kind: OperandKind, value: f64) -> Operand {
        match kind {
            OperandKind::Int8 => Operand::Int8(value as i8),
            OperandKind::Int16 => Operand::Int16(value as i16),
            OperandKind::Int32 => Operand::Int32(value as i32),
            OperandKind::Float => Operand::Float(value as f32),
            OperandKind::Double => Operand::Double(value),
        }
    }

    /// Kind of this operand
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Int8(_) => OperandKind::Int8,
            Operand::Int16(_) => OperandKind::Int16,
            Operand::Int32(_) => OperandKind::Int32,
            Operand::Float(_) => OperandKind::Float,
            Operand::Double(_) => OperandKind::Double,
        }
    }

    /// Precision rank of this operand's kind
    pub fn precision(&self) -> u8 {
        self.kind().precision()
    }

    /// Value of this operand in the extended intermediate
    pub fn to_numeric(&self) -> f64 {
        match self {
            Operand::Int8(v) => *v as f64,
            Operand::Int16(v) => *v as f64,
            Operand::Int32(v) => *v as f64,
            Operand::Float(v) => *v as f64,
            Operand::Double(v) => *v,
        }
    }

    /// Apply an arithmetic operator with this operand on the left
    ///
    /// The result kind is the higher-precision of the two operand kinds.
    /// Division and modulo check the divisor before computing.
    pub fn apply(&self, op: ArithOp, rhs: &Operand) -> OperandResult<Operand> {
        let kind = self.kind().max(rhs.kind());
        let a = self.to_numeric();
        let b = rhs.to_numeric();

        if matches!(op, ArithOp::Div | ArithOp::Mod) && b == 0.0 {
            return Err(OperandError::DivisionByZero);
        }

        let value = match op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
            ArithOp::Mod => a % b,
        };

        Operand::from_numeric(kind, value)
    }

    /// Render this operand as `kind(value)` for diagnostics
    pub fn describe(&self) -> String {
        format!("{}({})", self.kind(), self)
    }
}

impl fmt::Display for Operand {
    /// Canonical text form: integers undecorated, floats with enough
    /// significant digits to round-trip
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int8(v) => write!(f, "{}", v),
            Operand::Int16(v) => write!(f, "{}", v),
            Operand::Int32(v) => write!(f, "{}", v),
            Operand::Float(v) => write!(f, "{}", v),
            Operand::Double(v) => write!(f, "{}", v),
        }
    }
}

/// Parse a numeric literal into the extended intermediate
///
/// Accepts an optional leading sign, a digit run, and an optional `.`
/// followed by a digit run. No exponent notation.
fn parse_numeric(text: &str) -> OperandResult<f64> {
    let malformed = || OperandError::MalformedValue {
        text: text.to_string(),
    };

    let digits = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    if digits.is_empty() {
        return Err(malformed());
    }

    let (integral, fractional) = match digits.split_once('.') {
        Some((integral, fractional)) => (integral, Some(fractional)),
        None => (digits, None),
    };

    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    if let Some(fractional) = fractional {
        if !fractional.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
    }

    text.parse::<f64>().map_err(|_| malformed())
}

/// Check that an intermediate value fits the target kind
///
/// Integer kinds compare against exact bounds; float kinds accept values
/// whose rounding to the target width stays finite.
fn check_bounds(kind: OperandKind, value: f64, rendered: &str) -> OperandResult<()> {
    let out_of_range = match kind {
        OperandKind::Int8 | OperandKind::Int16 | OperandKind::Int32 => {
            if value < OperandKind::min(&kind) {
                Some(false)
            } else if value > OperandKind::max(&kind) {
                Some(true)
            } else {
                None
            }
        }
        OperandKind::Float => {
            let narrowed = value as f32;
            if narrowed == f32::INFINITY {
                Some(true)
            } else if narrowed == f32::NEG_INFINITY {
                Some(false)
            } else {
                None
            }
        }
        OperandKind::Double => {
            if value == f64::INFINITY {
                Some(true)
            } else if value == f64::NEG_INFINITY {
                Some(false)
            } else {
                None
            }
        }
    };

    match out_of_range {
        Some(true) => Err(OperandError::Overflow {
            value: rendered.to_string(),
            kind,
        }),
        Some(false) => Err(OperandError::Underflow {
            value: rendered.to_string(),
            kind,
        }),
        None => Ok(()),
    }
}

fn render_numeric(value: f64) -> String {
    format!("{}", value)
}
