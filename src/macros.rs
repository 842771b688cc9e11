/// Builds a [`Value`](crate::Value) from brass-like literal syntax.
///
/// Lists use `[...]` and maps use `{key: value, ...}`. Map keys must be literals
/// with a [`Primitive`](crate::Primitive) conversion (strings, integers, booleans).
/// Negative integer literals work as elements, keys and values. Anything else
/// falls back to `Value::from`; wrap longer expressions in parentheses.
///
/// ```rust
/// use serde_brass::{brass, Primitive, Value};
///
/// let value = brass!({
///     "id": 7,
///     1: [nil, true, "x", -2],
///     -1: -3,
///     "blob": (vec![0xffu8])
/// });
///
/// assert_eq!(
///     value.to_string(),
///     "{(\"id\" $7) ($1 (nil true \"x\" -$2)) (-$1 -$3) (\"blob\" #1$ff)}"
/// );
/// ```
#[macro_export]
macro_rules! brass {
    // List elements, accumulated one at a time.
    (@list [$($out:expr,)*]) => {
        vec![$($out),*]
    };

    (@list [$($out:expr,)*] - $elem:literal $(, $($rest:tt)*)?) => {
        $crate::brass!(@list [$($out,)* $crate::Value::from(-$elem),] $($($rest)*)?)
    };

    (@list [$($out:expr,)*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::brass!(@list [$($out,)* $crate::brass!($elem),] $($($rest)*)?)
    };

    // Map entries, inserted into `$map` one at a time.
    (@map $map:ident) => {};

    (@map $map:ident $key:literal : - $value:literal $(, $($rest:tt)*)?) => {
        $map.insert($crate::Primitive::from($key), $crate::Value::from(-$value));
        $crate::brass!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $map.insert($crate::Primitive::from($key), $crate::brass!($value));
        $crate::brass!(@map $map $($($rest)*)?);
    };

    (nil) => {
        $crate::Value::Nil
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elems:tt)+ ]) => {
        $crate::Value::List($crate::brass!(@list [] $($elems)+))
    };

    ({}) => {
        $crate::Value::Map($crate::BrassMap::new())
    };

    ({ $($entries:tt)+ }) => {{
        let mut map = $crate::BrassMap::new();
        $crate::brass!(@map map $($entries)+);
        $crate::Value::Map(map)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
