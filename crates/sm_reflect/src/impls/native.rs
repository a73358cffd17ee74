use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ReflectKind, ScalarInfo, ScalarKind, TypeInfo, Typed};
use crate::ops::{FloatMut, IntMut, ReflectMut, ReflectRef, ScalarMut, ScalarRef, UintMut};

macro_rules! impl_reflect_scalar {
    ($ty:ty, $kind:expr, |$r:ident| $to_ref:expr, |$m:ident| $to_mut:expr $(,)?) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<$ty>($kind)))
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn as_reflect(&self) -> &dyn Reflect {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
                self
            }

            #[inline]
            fn reflect_kind(&self) -> ReflectKind {
                ReflectKind::Scalar
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                let $r = self;
                ReflectRef::Scalar($to_ref)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                let $m = self;
                ReflectMut::Scalar($to_mut)
            }

            #[inline]
            fn set_zero(&mut self) {
                *self = <$ty>::default();
            }
        }
    };
}

impl_reflect_scalar!(
    String,
    ScalarKind::String,
    |v| ScalarRef::String(v.as_str()),
    |v| ScalarMut::String(v),
);

impl_reflect_scalar!(
    i8,
    ScalarKind::Int(8),
    |v| ScalarRef::Int(i64::from(*v)),
    |v| ScalarMut::Int(IntMut::I8(v)),
);
impl_reflect_scalar!(
    i16,
    ScalarKind::Int(16),
    |v| ScalarRef::Int(i64::from(*v)),
    |v| ScalarMut::Int(IntMut::I16(v)),
);
impl_reflect_scalar!(
    i32,
    ScalarKind::Int(32),
    |v| ScalarRef::Int(i64::from(*v)),
    |v| ScalarMut::Int(IntMut::I32(v)),
);
impl_reflect_scalar!(
    i64,
    ScalarKind::Int(64),
    |v| ScalarRef::Int(*v),
    |v| ScalarMut::Int(IntMut::I64(v)),
);
impl_reflect_scalar!(
    isize,
    ScalarKind::Int(isize::BITS),
    |v| ScalarRef::Int(*v as i64),
    |v| ScalarMut::Int(IntMut::Isize(v)),
);

impl_reflect_scalar!(
    u8,
    ScalarKind::Uint(8),
    |v| ScalarRef::Uint(u64::from(*v)),
    |v| ScalarMut::Uint(UintMut::U8(v)),
);
impl_reflect_scalar!(
    u16,
    ScalarKind::Uint(16),
    |v| ScalarRef::Uint(u64::from(*v)),
    |v| ScalarMut::Uint(UintMut::U16(v)),
);
impl_reflect_scalar!(
    u32,
    ScalarKind::Uint(32),
    |v| ScalarRef::Uint(u64::from(*v)),
    |v| ScalarMut::Uint(UintMut::U32(v)),
);
impl_reflect_scalar!(
    u64,
    ScalarKind::Uint(64),
    |v| ScalarRef::Uint(*v),
    |v| ScalarMut::Uint(UintMut::U64(v)),
);
impl_reflect_scalar!(
    usize,
    ScalarKind::Uint(usize::BITS),
    |v| ScalarRef::Uint(*v as u64),
    |v| ScalarMut::Uint(UintMut::Usize(v)),
);

impl_reflect_scalar!(
    f32,
    ScalarKind::Float(32),
    |v| ScalarRef::Float(f64::from(*v)),
    |v| ScalarMut::Float(FloatMut::F32(v)),
);
impl_reflect_scalar!(
    f64,
    ScalarKind::Float(64),
    |v| ScalarRef::Float(*v),
    |v| ScalarMut::Float(FloatMut::F64(v)),
);

impl_reflect_scalar!(bool, ScalarKind::Bool, |v| ScalarRef::Bool(*v), |v| ScalarMut::Bool(v));
impl_reflect_scalar!(char, ScalarKind::Char, |v| ScalarRef::Char(*v), |v| ScalarMut::Char(v));
