use oasplit_core::ir::TypeTag;

/// Map a semantic type tag to a Python type hint.
pub fn python_hint(tag: &TypeTag) -> String {
    match tag {
        TypeTag::Str => "str".to_string(),
        TypeTag::Int => "int".to_string(),
        TypeTag::Float => "float".to_string(),
        TypeTag::Bool => "bool".to_string(),
        TypeTag::Array(item) => format!("List[{}]", python_hint(item)),
        TypeTag::Object => "Dict[str, Any]".to_string(),
        TypeTag::Any => "Any".to_string(),
    }
}
