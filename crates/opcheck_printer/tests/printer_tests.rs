//! Printer tests over trees built in memory.

use bumpalo::Bump;
use opcheck_ast::{AstBuilder, BinaryOperator};
use opcheck_core::StringInterner;
use opcheck_printer::Printer;

#[test]
fn test_print_binary_expression() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let b = AstBuilder::new(&arena, &interner);
    let expr = b.binary(b.string("abc"), BinaryOperator::Concat, b.variable("obj"));
    assert_eq!(Printer::new(&interner).print_expr(expr), "'abc' . $obj");
}

#[test]
fn test_print_compound_assignment() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let b = AstBuilder::new(&arena, &interner);
    let expr = b.binary(b.variable("x"), BinaryOperator::ConcatAssign, b.variable("y"));
    assert_eq!(Printer::new(&interner).print_expr(expr), "$x .= $y");
}

#[test]
fn test_print_nested_and_literals() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let b = AstBuilder::new(&arena, &interner);
    let sum = b.binary(b.int(1), BinaryOperator::Plus, b.float(2.0));
    let expr = b.binary(
        b.paren(sum),
        BinaryOperator::Coalesce,
        b.array(vec![b.true_(), b.null(), b.false_()]),
    );
    assert_eq!(
        Printer::new(&interner).print_expr(expr),
        "(1 + 2.0) ?? [true, null, false]"
    );
}

#[test]
fn test_print_unit() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let b = AstBuilder::new(&arena, &interner);
    let unit = b.unit(
        "unit.php",
        vec![
            b.assign("arr", b.array(vec![b.int(1), b.int(2)])),
            b.expression_statement(b.binary(b.variable("arr"), BinaryOperator::Plus, b.int(1))),
        ],
    );
    assert_eq!(
        Printer::new(&interner).print_unit(&unit),
        "$arr = [1, 2];\n$arr + 1;\n"
    );
}

#[test]
fn test_printer_is_reusable() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let b = AstBuilder::new(&arena, &interner);
    let mut printer = Printer::new(&interner);
    assert_eq!(printer.print_expr(b.variable("a")), "$a");
    assert_eq!(printer.print_expr(b.variable("b")), "$b");
}
