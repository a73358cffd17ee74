use sm_reflect::info::{ScalarKind, StructInfo, TypeInfo};

use crate::plan::{FieldPlan, KeyRule, PlanNode};
use crate::tag::FieldTag;
use crate::{Config, Direction, Error};

/// Builds [`PlanNode`]s for one direction and configuration.
pub(crate) struct Compiler<'a> {
    config: &'a Config,
    op: Direction,
}

impl<'a> Compiler<'a> {
    #[inline]
    pub fn new(config: &'a Config, op: Direction) -> Self {
        Self { config, op }
    }

    /// Compiles the plan of a root type.
    ///
    /// A root is a struct or a pointer to one. Custom hooks on the root are
    /// not consulted, and a root pointer is treated as required.
    pub fn compile_root(&self, info: &'static TypeInfo) -> Result<PlanNode, Error> {
        match info {
            TypeInfo::Struct(info) => self.compile_struct(info, &[]),
            TypeInfo::Pointer(info) => {
                let elem = self.compile_root(info.pointee_info())?;
                Ok(PlanNode::Pointer(Box::new(elem)))
            }
            _ => Err(self.unsupported(info)),
        }
    }

    fn compile_struct(
        &self,
        info: &'static StructInfo,
        prefix: &[&'static str],
    ) -> Result<PlanNode, Error> {
        let mut fields = Vec::with_capacity(info.field_len());

        for (index, field) in info.iter().enumerate() {
            let name = field.name();

            let Some(tag) = FieldTag::parse(field.tag()).map_err(|err| err.in_field(name))? else {
                continue;
            };

            let mut path = prefix.to_vec();
            if !tag.name.is_empty() {
                path.push(tag.name);
            } else if !field.is_embedded() {
                path.push(name);
            }

            let node = self
                .compile_value(field.type_info(), &path)
                .map_err(|err| err.in_field(name))?;

            if node.is_nested() {
                if tag.required || tag.omit_empty {
                    return Err(Error::StructOption.in_field(name));
                }

                fields.push(FieldPlan {
                    index,
                    name,
                    rule: KeyRule::NESTED,
                    nested: true,
                    node,
                });
                continue;
            }

            // An unnamed embedded leaf still needs a key of its own.
            if field.is_embedded() && tag.name.is_empty() {
                path.push(name);
            }

            fields.push(FieldPlan {
                index,
                name,
                rule: KeyRule {
                    key: self.compose_key(&path),
                    required: tag.required,
                    omit_empty: tag.omit_empty,
                },
                nested: false,
                node,
            });
        }

        Ok(PlanNode::Nested(fields.into_boxed_slice()))
    }

    fn compile_value(
        &self,
        info: &'static TypeInfo,
        path: &[&'static str],
    ) -> Result<PlanNode, Error> {
        let hooks = info.hooks();
        let has_hook = match self.op {
            Direction::Marshal => hooks.marshal().is_some(),
            Direction::Unmarshal => hooks.unmarshal().is_some(),
        };
        if has_hook {
            return Ok(PlanNode::Custom(*hooks));
        }

        match info {
            TypeInfo::Pointer(info) => {
                let elem = self.compile_value(info.pointee_info(), path)?;
                Ok(PlanNode::Pointer(Box::new(elem)))
            }
            TypeInfo::Struct(info) => self.compile_struct(info, path),
            TypeInfo::Scalar(scalar) => match scalar.scalar_kind() {
                ScalarKind::String => Ok(PlanNode::String),
                ScalarKind::Int(bits) => Ok(PlanNode::Integer { bits }),
                _ => Err(self.unsupported(info)),
            },
            TypeInfo::List(list) => {
                let item = list.item_info();
                match item.as_scalar().map(|scalar| scalar.scalar_kind()) {
                    Ok(ScalarKind::String) => Ok(PlanNode::StringSlice),
                    Ok(ScalarKind::Int(bits)) => Ok(PlanNode::IntegerSlice { bits }),
                    _ => Err(Error::UnsupportedElement {
                        op: self.op,
                        ty: item.type_name(),
                    }),
                }
            }
            TypeInfo::Opaque(_) => Err(self.unsupported(info)),
        }
    }

    fn compose_key(&self, path: &[&str]) -> String {
        self.config.transform_key(path.join(self.config.delimiter()))
    }

    #[inline]
    fn unsupported(&self, info: &TypeInfo) -> Error {
        Error::UnsupportedKind {
            op: self.op,
            ty: info.type_name(),
        }
    }
}

/// Compiles a root plan, logging the outcome.
pub(crate) fn compile_logged(
    config: &Config,
    op: Direction,
    info: &'static TypeInfo,
) -> Result<PlanNode, Error> {
    let result = Compiler::new(config, op).compile_root(info);
    match &result {
        Ok(_) => log::debug!("compiled plan to {op} `{}`", info.type_name()),
        Err(err) => {
            log::debug!("failed to compile plan to {op} `{}`: {err}", info.type_name());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use sm_reflect::convert::{BoxError, ValueMarshaler};
    use sm_reflect::derive::Reflect;
    use sm_reflect::info::Typed;

    use super::Compiler;
    use crate::plan::{FieldPlan, PlanNode};
    use crate::{Config, Direction, Error};

    fn compile<T: Typed>(op: Direction) -> Result<PlanNode, Error> {
        Compiler::new(&Config::new(), op).compile_root(T::type_info())
    }

    fn fields(node: &PlanNode) -> &[FieldPlan] {
        match node {
            PlanNode::Nested(fields) => fields,
            PlanNode::Pointer(elem) => fields(elem),
            other => panic!("not a struct plan: {other:?}"),
        }
    }

    #[derive(Reflect, Default)]
    struct Paging {
        page: i32,
        #[reflect(map = "size,omitempty")]
        size: i16,
    }

    #[derive(Reflect)]
    struct Search {
        #[reflect(embed)]
        paging: Paging,
        #[reflect(map = "q,required")]
        query: String,
        #[reflect(embed)]
        token: String,
        #[reflect(map = "-")]
        hidden: String,
        #[reflect(map = "-,")]
        dash: String,
        tags: Vec<String>,
        ids: Vec<i64>,
        owner: Option<Box<Paging>>,
        #[reflect(ignore)]
        _scratch: f64,
    }

    #[test]
    fn keys_and_options() {
        let plan = compile::<Search>(Direction::Marshal).unwrap();

        assert_eq!(
            plan.keys(),
            [
                "page",
                "size",
                "q",
                "token",
                "-",
                "tags",
                "ids",
                "owner.page",
                "owner.size"
            ]
        );

        let fields = fields(&plan);
        assert!(fields[0].nested);
        assert!(fields[1].rule.required);
        assert!(matches!(fields[4].node, PlanNode::StringSlice));
        assert!(matches!(fields[5].node, PlanNode::IntegerSlice { bits: 64 }));
        assert!(fields[6].nested);
        assert!(matches!(fields[6].node, PlanNode::Pointer(_)));

        // `hidden` is skipped, so `dash` keeps its reflected index.
        assert_eq!(fields[3].name, "dash");
        assert_eq!(fields[3].index, 4);

        let paging = self::fields(&fields[0].node);
        assert!(paging[1].rule.omit_empty);
        assert!(matches!(paging[0].node, PlanNode::Integer { bits: 32 }));
    }

    #[test]
    fn delimiter_and_transform_apply_to_full_keys() {
        let config = Config::new()
            .with_delimiter("-")
            .with_key_transform(|key| key.to_uppercase());
        let plan = Compiler::new(&config, Direction::Unmarshal)
            .compile_root(Search::type_info())
            .unwrap();

        assert!(plan.keys().contains(&"OWNER-PAGE"));
        assert!(plan.keys().contains(&"Q"));
    }

    #[test]
    fn root_must_be_a_struct() {
        let err = compile::<String>(Direction::Unmarshal).unwrap_err();
        assert!(err.to_string().starts_with("cannot unmarshal into "));
        assert!(err.to_string().contains("String"));

        let plan = compile::<Option<Box<Paging>>>(Direction::Unmarshal).unwrap();
        assert!(plan.is_nested());
        assert_eq!(plan.keys(), ["page", "size"]);
    }

    #[derive(Reflect)]
    struct WithFloat {
        ratio: f64,
    }

    #[derive(Reflect)]
    struct WithFloats {
        ratios: Vec<f64>,
    }

    #[derive(Reflect)]
    struct Unsigned {
        count: u32,
    }

    #[test]
    fn unsupported_types_are_named() {
        let err = compile::<WithFloat>(Direction::Unmarshal).unwrap_err();
        assert_eq!(err.to_string(), "struct field ratio: cannot unmarshal into f64");

        let err = compile::<WithFloats>(Direction::Marshal).unwrap_err();
        assert_eq!(
            err.to_string(),
            "struct field ratios: cannot marshal from slice of f64"
        );

        let err = compile::<Unsigned>(Direction::Marshal).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            Error::UnsupportedKind { ty: "u32", .. }
        ));
    }

    #[derive(Reflect)]
    struct RequiredStruct {
        #[reflect(map = ",required")]
        paging: Paging,
    }

    #[derive(Reflect)]
    struct OmitPointerStruct {
        #[reflect(map = "p,omitempty")]
        paging: Option<Paging>,
    }

    #[test]
    fn struct_options_are_rejected() {
        for op in [Direction::Marshal, Direction::Unmarshal] {
            let err = compile::<RequiredStruct>(op).unwrap_err();
            assert_eq!(
                err.to_string(),
                "struct field paging: cannot set required or omitempty option for struct"
            );

            let err = compile::<OmitPointerStruct>(op).unwrap_err();
            assert!(matches!(err.root_cause(), Error::StructOption));
        }
    }

    #[derive(Reflect, Default)]
    #[reflect(Opaque, marshal)]
    struct Stamp(i64);

    impl ValueMarshaler for Stamp {
        fn marshal_value(&self) -> Result<Vec<String>, BoxError> {
            Ok(vec![format!("@{}", self.0)])
        }
    }

    #[derive(Reflect)]
    struct Stamped {
        at: Stamp,
    }

    #[test]
    fn hooks_are_checked_per_direction() {
        let plan = compile::<Stamped>(Direction::Marshal).unwrap();
        assert!(matches!(fields(&plan)[0].node, PlanNode::Custom(_)));

        // No unmarshal hook: the opaque type has nothing to fall back on.
        let err = compile::<Stamped>(Direction::Unmarshal).unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            format!("cannot unmarshal into {}", core::any::type_name::<Stamp>())
        );
    }
}
