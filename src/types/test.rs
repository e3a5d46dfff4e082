use super::*;

#[test]
fn test_duplicate_is_equal() {
    let types = vec![
        Type::Int,
        Type::Char,
        Type::String,
        Type::Double,
        Type::array(3, Type::array(2, Type::Char)),
    ];

    for ty in types {
        assert_eq!(ty, ty.duplicate());
    }
}

#[test]
fn test_duplicate_is_independent() {
    let original = Type::array(3, Type::array(2, Type::Int));
    let mut copy = original.duplicate();

    if let Type::Array { element, .. } = &mut copy {
        if let Type::Array { size, .. } = element.as_mut() {
            *size = 7;
        }
    }

    assert_eq!(original, Type::array(3, Type::array(2, Type::Int)));
    assert_ne!(original, copy);
}

#[test]
fn test_structural_equality() {
    assert_ne!(Type::array(3, Type::Int), Type::array(3, Type::Char));
    assert_eq!(
        Type::array(3, Type::array(2, Type::Int)),
        Type::array(3, Type::array(2, Type::Int))
    );
    assert_ne!(Type::array(3, Type::Int), Type::array(2, Type::Int));
    assert_ne!(Type::Int, Type::Char);
    assert_ne!(Type::Int, Type::Double);
}

#[test]
fn test_equality_is_symmetric() {
    let a = Type::array(4, Type::Char);
    let b = Type::array(4, Type::Int);
    assert_eq!(a == b, b == a);
    assert_eq!(a == a.clone(), a.clone() == a);
}

#[test]
fn test_element_and_display() {
    let ty = Type::array(5, Type::array(2, Type::Char));
    assert_eq!(ty.element(), Some(&Type::array(2, Type::Char)));
    assert_eq!(ty.to_string(), "array[5] of array[2] of char");
    assert!(Type::Int.element().is_none());
}

#[test]
fn test_constant_negation() {
    assert_eq!(ConstantValue::Int(4).negate(), Some(ConstantValue::Int(-4)));
    assert_eq!(ConstantValue::Char(b'a').negate(), None);
    assert_eq!(ConstantValue::Int(i32::MIN).negate(), None);
    assert_eq!(ConstantValue::Char(b'a').ty(), Type::Char);
}
