use core::num::{ParseIntError, TryFromIntError};

/// An immutable view of a scalar.
///
/// Integers are widened to 64 bits; the declared width is available from
/// [`ScalarInfo`](crate::info::ScalarInfo).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    String(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

/// A mutable view of a scalar.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    String(&'a mut String),
    Int(IntMut<'a>),
    Uint(UintMut<'a>),
    Float(FloatMut<'a>),
    Bool(&'a mut bool),
    Char(&'a mut char),
}

macro_rules! define_integer_mut {
    (
        $(#[$meta:meta])*
        $name:ident, $wide:ty: $($variant:ident($ty:ty)),* $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $name<'a> {
            $($variant(&'a mut $ty),)*
        }

        impl $name<'_> {
            /// Returns the width of the referenced integer in bits.
            pub fn bits(&self) -> u32 {
                match self {
                    $(Self::$variant(_) => <$ty>::BITS,)*
                }
            }

            /// Returns the referenced value, widened.
            pub fn get(&self) -> $wide {
                match self {
                    $(Self::$variant(v) => **v as $wide,)*
                }
            }

            /// Stores `value` if it fits the referenced width.
            pub fn set(&mut self, value: $wide) -> Result<(), TryFromIntError> {
                match self {
                    $(Self::$variant(v) => **v = <$ty>::try_from(value)?,)*
                }
                Ok(())
            }

            /// Parses base-10 `text` at the referenced width and stores it.
            ///
            /// The referenced value is unchanged on failure.
            pub fn parse(&mut self, text: &str) -> Result<(), ParseIntError> {
                match self {
                    $(Self::$variant(v) => **v = text.parse::<$ty>()?,)*
                }
                Ok(())
            }
        }
    };
}

define_integer_mut! {
    /// A mutable reference to a signed integer of any supported width.
    ///
    /// ```
    /// use sm_reflect::ops::IntMut;
    ///
    /// let mut value = 0_i8;
    /// let mut int = IntMut::I8(&mut value);
    ///
    /// assert!(int.parse("300").is_err());
    /// int.parse("-12").unwrap();
    /// assert_eq!(int.get(), -12);
    /// assert_eq!(int.bits(), 8);
    /// ```
    IntMut, i64: I8(i8), I16(i16), I32(i32), I64(i64), Isize(isize),
}

define_integer_mut! {
    /// A mutable reference to an unsigned integer of any supported width.
    UintMut, u64: U8(u8), U16(u16), U32(u32), U64(u64), Usize(usize),
}

/// A mutable reference to a floating point number.
#[derive(Debug)]
pub enum FloatMut<'a> {
    F32(&'a mut f32),
    F64(&'a mut f64),
}

impl FloatMut<'_> {
    /// Returns the referenced value, widened.
    pub fn get(&self) -> f64 {
        match self {
            Self::F32(v) => f64::from(**v),
            Self::F64(v) => **v,
        }
    }

    /// Stores `value`, rounding to the referenced precision.
    pub fn set(&mut self, value: f64) {
        match self {
            Self::F32(v) => **v = value as f32,
            Self::F64(v) => **v = value,
        }
    }
}
