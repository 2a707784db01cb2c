//! Declarative interface macro.

/// Declare a typed HTTP interface.
///
/// The macro generates a struct wrapping a [`BoundInterface`], its
/// [`Interface`] implementation and one method per declared endpoint. Every
/// generated method returns `Result<Request<T>, RestCallError>` where `T` is
/// the type the response body is decoded into.
///
/// Each method starts with the HTTP verb (`GET`, `PUT`, `POST` or `DELETE`)
/// and the path suffix, optionally followed by `multipart = true` and a
/// `headers { .. }` block. Each parameter starts with its role:
///
/// * `body` - encoded with the codec and sent as request body,
/// * `path` - substituted into the `{name}` placeholder,
/// * `query` - appended to the query string,
/// * `upload` - single file, multipart only,
/// * `uploads` - list of files, multipart only,
/// * `ignore` - accepted and ignored.
///
/// The parameter name is used as role name unless one is given in brackets,
/// e.g. `path["id"] account: &str`. `uploads` takes a list of names, file
/// `i` is attached under name `i`.
///
/// # Examples
/// ```
/// use restcall::{interface, BinderBuilder, FileSource};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct LoginForm {
///     account: String,
///     password: String,
/// }
///
/// #[derive(Deserialize)]
/// struct Envelope {
///     code: i32,
/// }
///
/// interface! {
///     /// User management API.
///     pub struct UserService at "/user" headers { "X-Client" => "demo" } {
///         /// Log in with account and password.
///         POST "/login" => fn login(body["model"] form: &LoginForm) -> Envelope;
///
///         GET "/{account}" headers { "X-Trace" => "on" }
///             => fn profile(path account: &str, query page: u32) -> Envelope;
///
///         POST "/avatar" multipart = true
///             => fn avatar(upload["file"] file: FileSource, ignore _hint: bool) -> Envelope;
///
///         POST "/gallery" multipart = true
///             => fn gallery(uploads["front", "back"] files: Vec<FileSource>) -> Envelope;
///     }
/// }
///
/// # fn main() -> Result<(), restcall::core::RestCallError> {
/// let users = BinderBuilder::new()
///     .base_url("http://localhost:8080")
///     .bind::<UserService>()?;
///
/// let request = users.profile("alice", 2)?;
/// assert_eq!(request.uri(), "http://localhost:8080/user/alice?page=2");
/// assert_eq!(request.headers().get("X-Trace"), Some("on"));
/// # Ok(())
/// # }
/// ```
///
/// [`BoundInterface`]: dx/binder/struct.BoundInterface.html
/// [`Interface`]: dx/binder/trait.Interface.html
#[macro_export]
macro_rules! interface {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident at $path:literal
        $( headers { $( $hk:literal => $hv:literal ),* $(,)? } )?
        {
            $(
                $(#[$mattr:meta])*
                $verb:ident $mpath:literal
                $( multipart = $mp:literal )?
                $( headers { $( $mhk:literal => $mhv:literal ),* $(,)? } )?
                => fn $method:ident (
                    $( $role:ident $( [ $( $pname:literal ),* ] )? $arg:ident : $aty:ty ),* $(,)?
                ) -> $ret:ty ;
            )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug)]
        $vis struct $name {
            bound: $crate::dx::binder::BoundInterface,
        }

        impl $crate::dx::binder::Interface for $name {
            fn descriptor() -> $crate::core::InterfaceDescriptor {
                $crate::core::InterfaceDescriptor::new(stringify!($name))
                    .endpoint(
                        $crate::core::EndpointMetadata::new($path)
                            $( $( .header($hk, $hv) )* )?
                    )
                    $(
                        .method(
                            $crate::__restcall_method!($verb, stringify!($method), $mpath)
                                $( .multipart($mp) )?
                                $( $( .header($mhk, $mhv) )* )?
                                $( .param($crate::__restcall_role!($role $( [ $( $pname ),* ] )? ; $arg)) )*
                                .returns::<$ret>()
                        )
                    )*
            }

            fn from_bound(bound: $crate::dx::binder::BoundInterface) -> Self {
                Self { bound }
            }
        }

        impl $name {
            $(
                $(#[$mattr])*
                pub fn $method(
                    &self,
                    $( $arg: $aty ),*
                ) -> ::std::result::Result<$crate::dx::request::Request<$ret>, $crate::core::RestCallError> {
                    let args = ::std::vec![ $( $crate::__restcall_argument!($role $arg) ),* ];
                    self.bound.invoke::<$ret>(stringify!($method), args)
                }
            )*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __restcall_method {
    (GET, $name:expr, $path:expr) => {
        $crate::core::MethodMetadata::get($name, $path)
    };
    (PUT, $name:expr, $path:expr) => {
        $crate::core::MethodMetadata::put($name, $path)
    };
    (POST, $name:expr, $path:expr) => {
        $crate::core::MethodMetadata::post($name, $path)
    };
    (DELETE, $name:expr, $path:expr) => {
        $crate::core::MethodMetadata::delete($name, $path)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __restcall_role {
    (body [ $n:literal ] ; $arg:ident) => {
        $crate::core::ParamRole::body($n)
    };
    (body ; $arg:ident) => {
        $crate::core::ParamRole::body(stringify!($arg))
    };
    (path [ $n:literal ] ; $arg:ident) => {
        $crate::core::ParamRole::path_variable($n)
    };
    (path ; $arg:ident) => {
        $crate::core::ParamRole::path_variable(stringify!($arg))
    };
    (query [ $n:literal ] ; $arg:ident) => {
        $crate::core::ParamRole::query($n)
    };
    (query ; $arg:ident) => {
        $crate::core::ParamRole::query(stringify!($arg))
    };
    (upload [ $n:literal ] ; $arg:ident) => {
        $crate::core::ParamRole::upload($n)
    };
    (upload ; $arg:ident) => {
        $crate::core::ParamRole::upload(stringify!($arg))
    };
    (uploads $( [ $( $n:literal ),* ] )? ; $arg:ident) => {{
        let names: ::std::vec::Vec<&'static str> = ::std::vec![ $( $( $n ),* )? ];
        $crate::core::ParamRole::upload_many(names)
    }};
    (ignore $( [ $( $n:literal ),* ] )? ; $arg:ident) => {
        $crate::core::ParamRole::Unannotated
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __restcall_argument {
    (body $arg:ident) => {
        $crate::dx::binder::Argument::json(&$arg)?
    };
    (path $arg:ident) => {
        $crate::dx::binder::Argument::display(&$arg)
    };
    (query $arg:ident) => {
        $crate::dx::binder::Argument::display(&$arg)
    };
    (upload $arg:ident) => {
        $crate::dx::binder::Argument::file($arg)
    };
    (uploads $arg:ident) => {
        $crate::dx::binder::Argument::files($arg)
    };
    (ignore $arg:ident) => {{
        let _ = &$arg;
        $crate::dx::binder::Argument::Ignored
    }};
}
