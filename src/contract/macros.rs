//! The `contract!` macro: one ahead-of-time adapter per contract.

/// Declare a mockable contract, or adapt an existing trait.
///
/// The declaring form emits the trait itself, a proxy struct implementing it
/// by forwarding every member to a [`MockSession`](crate::MockSession), a
/// quoting surface for [`Mock::setup`](crate::Mock::setup) and the
/// verification queries, and the [`Contract`](crate::Contract)
/// implementation for `dyn Trait` tying them together. Mock it as
/// `Mock<dyn Trait>`.
///
/// ```ignore
/// proxymock::contract! {
///     pub trait Worker: std::fmt::Debug + Send + Sync {
///         fn do_something(&self, a: i32, b: String, c: bool) -> i32;
///         fn lookup(&self, key: &str) -> Option<String>;
///         fn notify(&self, message: String);
///         property height: i32 => set_height;
///         property label: String;
///     }
///     proxy WorkerProxy;
///     calls WorkerCalls;
/// }
/// ```
///
/// The adapting form leaves an existing trait alone, which may live in the
/// crate under test or in another crate, and implements [`Contract`](crate::Contract)
/// for the generated proxy instead. Mock it as `Mock<StoreProxy>`; its
/// `object()` is a `&dyn Store`.
///
/// ```ignore
/// proxymock::contract! {
///     proxy StoreProxy for my_crate::Store {
///         fn get(&self, key: &str) -> Option<Vec<u8>>;
///         fn put(&self, key: &str, value: &[u8]);
///     }
///     calls StoreCalls;
/// }
/// ```
///
/// Members are `&self` methods and properties. A property declared as
/// `property name: Type => set_name;` stands for a getter
/// `name(&self) -> Type` and a setter `set_name(&self, value: Type)`;
/// without `=> setter` it is read-only.
///
/// Owned parameter types must implement [`Argument`](crate::Argument).
/// Borrowed parameters (`&str`, `&[u8]`, `&T`) are recorded through
/// `ToOwned` and matched against the owned form: `String`, `Vec<u8>`, `T`.
/// Return types must implement `Default + Send + 'static`.
#[macro_export]
macro_rules! contract {
    // method returning a value
    (@munch $header:tt $methods:tt $properties:tt
        $(#[$mattr:meta])*
        fn $method:ident(&self $($params:tt)*) -> $ret:ty;
        $($rest:tt)*
    ) => {
        $crate::contract!(@params $header $methods $properties
            [[$(#[$mattr])*] $method [$ret]] [] ($($params)*)
            $($rest)*
        );
    };

    // method returning nothing
    (@munch $header:tt $methods:tt $properties:tt
        $(#[$mattr:meta])*
        fn $method:ident(&self $($params:tt)*);
        $($rest:tt)*
    ) => {
        $crate::contract!(@params $header $methods $properties
            [[$(#[$mattr])*] $method []] [] ($($params)*)
            $($rest)*
        );
    };

    // read-write property
    (@munch $header:tt $methods:tt [$($properties:tt)*]
        $(#[$pattr:meta])*
        property $property:ident : $pty:ty => $setter:ident;
        $($rest:tt)*
    ) => {
        $crate::contract!(@munch $header
            $methods
            [$($properties)* { [$(#[$pattr])*] $property $pty [$setter] }]
            $($rest)*
        );
    };

    // read-only property
    (@munch $header:tt $methods:tt [$($properties:tt)*]
        $(#[$pattr:meta])*
        property $property:ident : $pty:ty;
        $($rest:tt)*
    ) => {
        $crate::contract!(@munch $header
            $methods
            [$($properties)* { [$(#[$pattr])*] $property $pty [] }]
            $($rest)*
        );
    };

    (@munch $header:tt $methods:tt $properties:tt) => {
        $crate::contract!(@emit $header $methods $properties);
    };

    // Parameters are normalized one at a time into
    // `{ name [signature type] [recorded type] owned|borrowed }`.
    (@params $header:tt [$($methods:tt)*] $properties:tt
        [$mattrs:tt $method:ident $ret:tt] [$($params:tt)*]
        ($(,)?)
        $($rest:tt)*
    ) => {
        $crate::contract!(@munch $header
            [$($methods)* { $mattrs $method [$($params)*] $ret }]
            $properties
            $($rest)*
        );
    };

    (@params $header:tt $methods:tt $properties:tt $sig:tt [$($params:tt)*]
        (, $arg:ident : & $rty:ty $(, $($more:tt)*)?)
        $($rest:tt)*
    ) => {
        $crate::contract!(@params $header $methods $properties $sig
            [$($params)* { $arg [& $rty] [<$rty as ::std::borrow::ToOwned>::Owned] borrowed }]
            ($(, $($more)*)?)
            $($rest)*
        );
    };

    (@params $header:tt $methods:tt $properties:tt $sig:tt [$($params:tt)*]
        (, $arg:ident : $ty:ty $(, $($more:tt)*)?)
        $($rest:tt)*
    ) => {
        $crate::contract!(@params $header $methods $properties $sig
            [$($params)* { $arg [$ty] [$ty] owned }]
            ($(, $($more)*)?)
            $($rest)*
        );
    };

    (@emit [declare $attrs:tt [$vis:vis] $name:ident $bounds:tt $proxy:ident $calls:ident]
        $methods:tt $properties:tt
    ) => {
        $crate::contract!(@trait $attrs [$vis] $name $bounds $methods $properties);
        $crate::contract!(@proxy [$vis] $proxy [$name] $methods $properties);
        $crate::contract!(@calls [$vis] $calls $methods $properties);

        impl $crate::Contract for dyn $name {
            type Object = dyn $name;
            type Proxy = $proxy;
            type Calls = $calls;

            fn describe() -> $crate::ContractDescriptor {
                $crate::contract!(@describe [$name] $methods $properties)
            }

            fn bind(session: ::std::sync::Arc<$crate::MockSession>) -> $proxy {
                $proxy { session }
            }

            fn calls() -> $calls {
                $calls
            }

            fn upcast(proxy: &$proxy) -> &Self::Object {
                proxy
            }

            fn upcast_arc(proxy: ::std::sync::Arc<$proxy>) -> ::std::sync::Arc<Self::Object> {
                proxy
            }
        }
    };

    (@emit [adapt [$vis:vis] [$tr:path] $proxy:ident $calls:ident]
        $methods:tt $properties:tt
    ) => {
        $crate::contract!(@proxy [$vis] $proxy [$tr] $methods $properties);
        $crate::contract!(@calls [$vis] $calls $methods $properties);

        impl $crate::Contract for $proxy {
            type Object = dyn $tr;
            type Proxy = $proxy;
            type Calls = $calls;

            fn describe() -> $crate::ContractDescriptor {
                $crate::contract!(@describe [$tr] $methods $properties)
            }

            fn bind(session: ::std::sync::Arc<$crate::MockSession>) -> $proxy {
                $proxy { session }
            }

            fn calls() -> $calls {
                $calls
            }

            fn upcast(proxy: &$proxy) -> &Self::Object {
                proxy
            }

            fn upcast_arc(proxy: ::std::sync::Arc<$proxy>) -> ::std::sync::Arc<Self::Object> {
                proxy
            }
        }
    };

    (@trait [$(#[$attr:meta])*] [$vis:vis] $name:ident [$($bounds:tt)*]
        [$({
            [$(#[$mattr:meta])*] $method:ident
            [$({ $arg:ident [$($sig:tt)*] $owned:tt $conv:ident })*]
            [$($ret:ty)?]
        })*]
        [$({ [$(#[$pattr:meta])*] $property:ident $pty:ty [$($setter:ident)?] })*]
    ) => {
        $(#[$attr])*
        $vis trait $name $($bounds)* {
            $(
                $(#[$mattr])*
                fn $method(&self $(, $arg: $($sig)*)*) $(-> $ret)?;
            )*
            $(
                $(#[$pattr])*
                fn $property(&self) -> $pty;
                $(
                    fn $setter(&self, value: $pty);
                )?
            )*
        }
    };

    (@proxy [$vis:vis] $proxy:ident [$tr:path]
        [$({
            $mattrs:tt $method:ident
            [$({ $arg:ident [$($sig:tt)*] $owned:tt $conv:ident })*]
            [$($ret:ty)?]
        })*]
        [$({ $pattrs:tt $property:ident $pty:ty [$($setter:ident)?] })*]
    ) => {
        #[doc = concat!("Forwarding proxy for `", stringify!($tr), "`.")]
        #[derive(Debug)]
        $vis struct $proxy {
            #[allow(dead_code)]
            session: ::std::sync::Arc<$crate::MockSession>,
        }

        impl $tr for $proxy {
            $(
                fn $method(&self $(, $arg: $($sig)*)*) $(-> $ret)? {
                    $crate::runtime::proxy::forward::<$crate::__proxymock_ret!($($ret)?)>(
                        &self.session,
                        $crate::__proxymock_member_id!(method $method [$([$($sig)*])*]),
                        ::std::vec![$($crate::__proxymock_capture!($conv $arg)),*],
                    )
                }
            )*
            $(
                fn $property(&self) -> $pty {
                    $crate::runtime::proxy::forward::<$pty>(
                        &self.session,
                        $crate::__proxymock_member_id!(get $property $pty),
                        ::std::vec::Vec::new(),
                    )
                }
                $(
                    fn $setter(&self, value: $pty) {
                        $crate::runtime::proxy::forward::<()>(
                            &self.session,
                            $crate::__proxymock_member_id!(set $property $pty),
                            ::std::vec![$crate::Value::new(value)],
                        )
                    }
                )?
            )*
        }
    };

    (@calls [$vis:vis] $calls:ident
        [$({
            $mattrs:tt $method:ident
            [$({ $arg:ident [$($sig:tt)*] [$($owned:tt)*] $conv:ident })*]
            [$($ret:ty)?]
        })*]
        [$({ $pattrs:tt $property:ident $pty:ty [$($setter:ident)?] })*]
    ) => {
        /// Quoting surface: mirrors the contract, returns expressions.
        #[derive(Debug, Default, Clone, Copy)]
        $vis struct $calls;

        #[allow(dead_code)]
        impl $calls {
            $(
                pub fn $method(
                    &self
                    $(, $arg: impl ::std::convert::Into<$crate::Arg<$($owned)*>>)*
                ) -> $crate::Quoted<$crate::__proxymock_ret!($($ret)?)> {
                    $crate::Quoted::call(
                        $crate::__proxymock_member_id!(method $method [$([$($sig)*])*]),
                        ::std::vec![$($crate::ArgExpr::from(
                            ::std::convert::Into::<$crate::Arg<$($owned)*>>::into($arg)
                        )),*],
                    )
                }
            )*
            $(
                pub fn $property(&self) -> $crate::Quoted<$pty> {
                    $crate::Quoted::property(
                        $crate::__proxymock_member_id!(get $property $pty),
                        $crate::__proxymock_setter_id!($property $pty $(, $setter)?),
                    )
                }
            )*
        }
    };

    (@describe [$($name:tt)*]
        [$({
            $mattrs:tt $method:ident
            [$({ $arg:ident [$($sig:tt)*] [$($owned:tt)*] $conv:ident })*]
            [$($ret:ty)?]
        })*]
        [$({ $pattrs:tt $property:ident $pty:ty [$($setter:ident)?] })*]
    ) => {{
        let descriptor = $crate::ContractDescriptor::new(stringify!($($name)*));
        $(
            let descriptor = descriptor.member($crate::MemberDescriptor::method(
                $crate::__proxymock_member_id!(method $method [$([$($sig)*])*]),
                ::std::vec![$($crate::ParamDef::of::<$($owned)*>(stringify!($arg))),*],
                $crate::__proxymock_returns!($($ret)?),
            ));
        )*
        $(
            let descriptor = descriptor.member($crate::MemberDescriptor::getter::<$pty>(
                $crate::__proxymock_member_id!(get $property $pty),
            ));
            $(
                let descriptor = $crate::__proxymock_with_setter!(
                    descriptor $property $pty, $setter
                );
            )?
        )*
        descriptor
    }};

    // Supertrait bounds are collected verbatim up to the trait body.
    (@bounds [$attrs:tt $vis:tt $name:ident] [$($bounds:tt)*]
        { $($body:tt)* }
        proxy $proxy:ident;
        calls $calls:ident;
    ) => {
        $crate::contract!(@munch
            [declare $attrs $vis $name [$($bounds)*] $proxy $calls]
            []
            []
            $($body)*
        );
    };

    (@bounds $head:tt [$($bounds:tt)*] $next:tt $($rest:tt)*) => {
        $crate::contract!(@bounds $head [$($bounds)* $next] $($rest)*);
    };

    (
        $vis:vis proxy $proxy:ident for $tr:path {
            $($body:tt)*
        }
        calls $calls:ident;
    ) => {
        $crate::contract!(@munch
            [adapt [$vis] [$tr] $proxy $calls]
            []
            []
            $($body)*
        );
    };

    (
        $(#[$attr:meta])*
        $vis:vis trait $name:ident $($rest:tt)*
    ) => {
        $crate::contract!(@bounds [[$(#[$attr])*] [$vis] $name] [] $($rest)*);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxymock_ret {
    () => { () };
    ($ret:ty) => { $ret };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxymock_returns {
    () => {
        ::std::option::Option::None
    };
    ($ret:ty) => {
        ::std::option::Option::Some(::std::any::type_name::<$ret>())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxymock_member_id {
    (method $method:ident [$([$($sig:tt)*])*]) => {
        $crate::MemberId::method(stringify!($method), stringify!($($($sig)*),*))
    };
    (get $property:ident $pty:ty) => {
        $crate::MemberId::getter(stringify!($property), stringify!($pty))
    };
    (set $property:ident $pty:ty) => {
        $crate::MemberId::setter(stringify!($property), stringify!($pty))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxymock_capture {
    (owned $arg:ident) => {
        $crate::Value::new($arg)
    };
    (borrowed $arg:ident) => {
        $crate::Value::new(::std::borrow::ToOwned::to_owned($arg))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxymock_setter_id {
    ($property:ident $pty:ty) => {
        ::std::option::Option::None
    };
    ($property:ident $pty:ty, $setter:ident) => {
        ::std::option::Option::Some($crate::__proxymock_member_id!(set $property $pty))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __proxymock_with_setter {
    ($descriptor:ident $property:ident $pty:ty, $setter:ident) => {
        $descriptor.member($crate::MemberDescriptor::setter::<$pty>(
            $crate::__proxymock_member_id!(set $property $pty),
        ))
    };
}
