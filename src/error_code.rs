/// Documented RTTI error codes.
///
/// Only RTTI puts a `Code` in its error bodies; RTDS and GTFS-realtime errors
/// never map to one of these.
macro_rules! error_codes {
    ($($variant:ident => $code:literal, $description:literal;)+) => {
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        #[non_exhaustive]
        pub enum ErrorCode {
            $($variant,)+
        }

        impl ErrorCode {
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant,)+];

            /// The code as it appears in the error body.
            pub fn code(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $code,)+
                }
            }

            /// The documented description of the code.
            pub fn description(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $description,)+
                }
            }
        }
    };
}

error_codes! {
    // 1000x: general
    InvalidApiKey => "10001", "Invalid API key";
    DatabaseError => "10002", "Database connection error";

    // 10xx: stops
    StopInvalidStop => "1001", "Invalid stop number";
    StopNotFound => "1002", "Stop number not found";
    StopUnknownCheck => "1003", "Unknown stop check error";
    StopUnknownGet => "1004", "Unknown get stop error";
    StopsInvalidCoordinates => "1011", "Invalid latitude/longitude";
    StopsNotFound => "1012", "No stops found";
    StopsUnknownGet => "1013", "Unknown get stops error";
    StopsRadiusTooLarge => "1014", "Radius too large";
    StopsInvalidRoute => "1015", "Invalid route number";

    // 20xx: buses
    BusInvalidBus => "2001", "Invalid bus number";
    BusNotFound => "2002", "Bus number not found";
    BusUnknownGet => "2003", "Unknown get bus error";
    BusesNotFound => "2011", "No buses found";
    BusesUnknownGetByStop => "2012", "Unknown get buses by stop error";
    BusesUnknownGetByRoute => "2013", "Unknown get buses by route error";
    BusesInvalidStop => "2014", "Invalid stop number";
    BusesInvalidRoute => "2015", "Invalid route number";
    BusesStopNotFound => "2016", "Stop number not found";
    BusesRouteNotFound => "2017", "Route number not found";
    BusesUnknownGetByStopAndRoute => "2018", "Unknown get buses by stop and route error";

    // 30xx: stop estimates
    EstimatesInvalidStop => "3001", "Invalid stop number";
    EstimatesStopNotFound => "3002", "Stop number not found";
    EstimatesUnknown => "3003", "Unknown get estimates error";
    EstimatesInvalidRoute => "3004", "Invalid route";
    EstimatesNotFound => "3005", "No stop estimates found";
    EstimatesInvalidTimeframe => "3006", "Invalid time frame";
    EstimatesInvalidCount => "3007", "Invalid count";

    // 40xx: routes
    RouteNotFound => "4002", "Route number not found";
    RouteUnknownGet => "4003", "Unknown get route error";
    RouteInvalidRoute => "4004", "Invalid route number";
    RoutesInvalidStop => "4011", "Invalid stop number";
    RoutesStopNotFound => "4012", "Stop number not found";
    RoutesUnknown => "4013", "Unknown error";
    RoutesNotFound => "4014", "No routes found";

    // 500x: status
    StatusInvalidService => "5001", "Invalid service name";
}

impl ErrorCode {
    pub fn from_code(code: &str) -> Option<ErrorCode> {
        ErrorCode::ALL.iter().copied().find(|c| c.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = ErrorCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn lookup() {
        assert_eq!(ErrorCode::from_code("1012"), Some(ErrorCode::StopsNotFound));
        assert_eq!(ErrorCode::StopsNotFound.description(), "No stops found");
        assert_eq!(ErrorCode::from_code("10001"), Some(ErrorCode::InvalidApiKey));
        assert_eq!(ErrorCode::from_code(""), None);
        assert_eq!(ErrorCode::from_code("9999"), None);
    }
}
