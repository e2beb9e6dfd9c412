//! Building and taking apart union types.

use crate::types::{Type, UnionType};

/// Combine `types` into one normalized type.
///
/// Nested unions are flattened. `Error` absorbs everything, then `Mixed`
/// does. `Never` members vanish, and a member covered by another member is
/// dropped. Zero members give `Never`, one member gives that member.
pub fn union(types: Vec<Type>) -> Type {
    let mut flat: Vec<Type> = Vec::with_capacity(types.len());
    for ty in types {
        match ty {
            Type::Union(u) => flat.extend(u.types().iter().cloned()),
            other => flat.push(other),
        }
    }

    if flat.iter().any(Type::is_error) {
        return Type::Error;
    }
    if flat.iter().any(|ty| matches!(ty, Type::Mixed)) {
        return Type::Mixed;
    }

    let mut kept: Vec<Type> = Vec::with_capacity(flat.len());
    for ty in flat {
        if matches!(ty, Type::Never) {
            continue;
        }
        if kept.iter().any(|k| k.is_super_type_of(&ty).yes()) {
            continue;
        }
        // The new member takes the slot of the first member it covers.
        let mut slot = None;
        let mut i = 0;
        while i < kept.len() {
            if ty.is_super_type_of(&kept[i]).yes() {
                if slot.is_none() {
                    slot = Some(i);
                    i += 1;
                } else {
                    kept.remove(i);
                }
            } else {
                i += 1;
            }
        }
        match slot {
            Some(i) => kept[i] = ty,
            None => kept.push(ty),
        }
    }

    collapse_booleans(&mut kept);

    match kept.len() {
        0 => Type::Never,
        1 => kept.pop().unwrap_or(Type::Never),
        _ => Type::Union(UnionType::new(kept)),
    }
}

/// `true|false` is `bool`.
fn collapse_booleans(kept: &mut Vec<Type>) {
    let has_true = kept.contains(&Type::ConstantBool(true));
    let has_false = kept.contains(&Type::ConstantBool(false));
    if !(has_true && has_false) {
        return;
    }
    let Some(first) = kept
        .iter()
        .position(|ty| matches!(ty, Type::ConstantBool(_)))
    else {
        return;
    };
    kept[first] = Type::Bool;
    let mut index = 0;
    kept.retain(|ty| {
        let keep = index == first || !matches!(ty, Type::ConstantBool(_));
        index += 1;
        keep
    });
}

/// `ty` without its `null` part. `null` itself becomes `Never`.
pub fn remove_null(ty: &Type) -> Type {
    match ty {
        Type::Null => Type::Never,
        Type::Union(u) => union(
            u.types()
                .iter()
                .filter(|member| !member.is_null())
                .cloned()
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_normalizes() {
        assert_eq!(union(vec![]), Type::Never);
        assert_eq!(union(vec![Type::Int]), Type::Int);
        assert_eq!(union(vec![Type::Int, Type::Never]), Type::Int);
        assert_eq!(union(vec![Type::Int, Type::Int]), Type::Int);
        assert_eq!(union(vec![Type::ConstantInt(1), Type::Int]), Type::Int);
        assert_eq!(union(vec![Type::Int, Type::ConstantInt(1)]), Type::Int);
    }

    #[test]
    fn test_union_absorbs() {
        assert_eq!(union(vec![Type::Int, Type::Error]), Type::Error);
        assert_eq!(union(vec![Type::Mixed, Type::Int]), Type::Mixed);
        assert_eq!(union(vec![Type::Mixed, Type::Error]), Type::Error);
    }

    #[test]
    fn test_union_flattens_and_keeps_order() {
        let inner = union(vec![Type::String, Type::Int]);
        let outer = union(vec![Type::Null, inner, Type::Float]);
        let members = outer.members();
        assert_eq!(members, &[Type::Null, Type::String, Type::Int, Type::Float]);
    }

    #[test]
    fn test_union_replaces_covered_member_in_place() {
        let ty = union(vec![
            Type::ConstantInt(1),
            Type::String,
            Type::ConstantInt(2),
            Type::Int,
        ]);
        assert_eq!(ty.members(), &[Type::Int, Type::String]);
    }

    #[test]
    fn test_union_collapses_booleans() {
        assert_eq!(
            union(vec![Type::ConstantBool(true), Type::ConstantBool(false)]),
            Type::Bool
        );
        let ty = union(vec![Type::ConstantBool(true), Type::Int, Type::ConstantBool(false)]);
        assert_eq!(ty.members(), &[Type::Bool, Type::Int]);
    }

    #[test]
    fn test_remove_null() {
        assert_eq!(remove_null(&Type::Null), Type::Never);
        assert_eq!(remove_null(&union(vec![Type::Int, Type::Null])), Type::Int);
        let ty = union(vec![Type::Int, Type::Null, Type::String]);
        assert_eq!(remove_null(&ty), union(vec![Type::Int, Type::String]));
        assert_eq!(remove_null(&Type::Float), Type::Float);
    }
}
