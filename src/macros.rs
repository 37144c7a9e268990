/// Builds an [`EnvMap`](crate::EnvMap) of string values from `key => value`
/// pairs.
///
/// Keys and values may be any expression implementing `ToString`.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::{envmap, to_string};
///
/// let map = envmap! {
///     "HOST" => "localhost",
///     "PORT" => 8080,
/// };
/// assert_eq!(to_string(&map), "HOST=\"localhost\"\nPORT=\"8080\"");
/// ```
#[macro_export]
macro_rules! envmap {
    () => {
        $crate::EnvMap::<::std::string::String>::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::EnvMap::<::std::string::String>::new();
        $(
            map.insert(
                ::std::string::ToString::to_string(&$key),
                ::std::string::ToString::to_string(&$value),
            );
        )+
        map
    }};
}
