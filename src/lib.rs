#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use sm_codec as codec;
pub use sm_reflect as reflect;
pub use sm_utils as utils;

pub use sm_codec::{
    Config, Error, FlatMap, Marshaler, Unmarshaler, ValueMap, marshal, unmarshal,
};
pub use sm_reflect::derive::Reflect;
