//! Closed enumerations of the HTTP status codes a handler may answer with.
//!
//! A response can only carry one of these values, so an unsupported status
//! is a compile-time error rather than a runtime check. Numbers coming from
//! outside go through `TryFrom<u16>`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned when a number is not part of the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP status code {0}")]
pub struct UnsupportedStatusCode(pub u16);

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u16", into = "u16")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every member of the enumeration.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Numeric value.
            #[must_use]
            pub const fn as_u16(self) -> u16 {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl From<$name> for u16 {
            fn from(code: $name) -> Self {
                code.as_u16()
            }
        }

        impl TryFrom<u16> for $name {
            type Error = UnsupportedStatusCode;

            fn try_from(code: u16) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(UnsupportedStatusCode(other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_u16())
            }
        }
    };
}

status_enum! {
    /// 2xx codes.
    HttpSuccessStatusCode {
        /// 200
        Ok = 200,
        /// 201
        Created = 201,
        /// 202
        Accepted = 202,
        /// 204
        NoContent = 204,
    }
}

status_enum! {
    /// 3xx codes.
    HttpRedirectionStatusCode {
        /// 301
        MovedPermanently = 301,
        /// 302
        Found = 302,
        /// 304
        NotModified = 304,
    }
}

status_enum! {
    /// 4xx and 5xx codes.
    HttpErrorStatusCode {
        /// 400
        BadRequest = 400,
        /// 401
        Unauthorized = 401,
        /// 403
        Forbidden = 403,
        /// 404
        NotFound = 404,
        /// 409
        Conflict = 409,
        /// 422
        UnprocessableEntity = 422,
        /// 429
        TooManyRequests = 429,
        /// 500
        InternalServerError = 500,
        /// 501
        NotImplemented = 501,
        /// 503
        ServiceUnavailable = 503,
    }
}

/// Any status a handler may answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum HttpStatusCode {
    /// 2xx
    Success(HttpSuccessStatusCode),
    /// 3xx
    Redirection(HttpRedirectionStatusCode),
    /// 4xx / 5xx
    Error(HttpErrorStatusCode),
}

impl HttpStatusCode {
    /// Numeric value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::Success(code) => code.as_u16(),
            Self::Redirection(code) => code.as_u16(),
            Self::Error(code) => code.as_u16(),
        }
    }
}

impl From<HttpSuccessStatusCode> for HttpStatusCode {
    fn from(code: HttpSuccessStatusCode) -> Self {
        Self::Success(code)
    }
}

impl From<HttpRedirectionStatusCode> for HttpStatusCode {
    fn from(code: HttpRedirectionStatusCode) -> Self {
        Self::Redirection(code)
    }
}

impl From<HttpErrorStatusCode> for HttpStatusCode {
    fn from(code: HttpErrorStatusCode) -> Self {
        Self::Error(code)
    }
}

impl From<HttpStatusCode> for u16 {
    fn from(code: HttpStatusCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for HttpStatusCode {
    type Error = UnsupportedStatusCode;

    fn try_from(code: u16) -> Result<Self, UnsupportedStatusCode> {
        HttpSuccessStatusCode::try_from(code)
            .map(Self::Success)
            .or_else(|_| HttpRedirectionStatusCode::try_from(code).map(Self::Redirection))
            .or_else(|_| HttpErrorStatusCode::try_from(code).map(Self::Error))
    }
}

impl fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_is_closed() {
        assert!(HttpStatusCode::try_from(418).is_err());
        assert!(HttpStatusCode::try_from(205).is_err());
        assert_eq!(
            HttpStatusCode::try_from(404).unwrap(),
            HttpStatusCode::Error(HttpErrorStatusCode::NotFound)
        );
    }

    #[test]
    fn test_round_trip_through_u16() {
        let all = HttpSuccessStatusCode::ALL
            .iter()
            .map(|&c| HttpStatusCode::from(c))
            .chain(HttpRedirectionStatusCode::ALL.iter().map(|&c| c.into()))
            .chain(HttpErrorStatusCode::ALL.iter().map(|&c| c.into()));

        for code in all {
            assert_eq!(HttpStatusCode::try_from(code.as_u16()).unwrap(), code);
        }
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&HttpErrorStatusCode::UnprocessableEntity).unwrap();
        assert_eq!(json, "422");

        let parsed: HttpStatusCode = serde_json::from_str("201").unwrap();
        assert_eq!(parsed, HttpStatusCode::Success(HttpSuccessStatusCode::Created));
    }
}
