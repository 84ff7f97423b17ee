//! Embedded WMO BUFR table subset
//!
//! Table B (element descriptors) and Table D (sequence descriptors) entries
//! for master table 0, version 13, restricted to the subtree reachable from
//! the synoptic land-station template 3 07 080. Element names follow the
//! ecCodes key abbreviations so lookup tables written for ecCodes-based
//! tooling resolve unchanged.
//!
//! Scale, reference and width triplets determine the packed form of a value:
//! `packed = round(value * 10^scale) - reference`, stored in `width` bits.

/// A Table B element descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSpec {
    /// Numeric descriptor code with F = 0 implied (0 12 101 is `12101`)
    pub code: u32,
    /// ecCodes-style key name
    pub name: &'static str,
    /// Unit as given in Table B
    pub unit: &'static str,
    /// Decimal scale applied before packing
    pub scale: i32,
    /// Reference value subtracted after scaling
    pub reference: i64,
    /// Field width in bits
    pub width: u32,
}

impl ElementSpec {
    const fn new(
        code: u32,
        name: &'static str,
        unit: &'static str,
        scale: i32,
        reference: i64,
        width: u32,
    ) -> Self {
        Self {
            code,
            name,
            unit,
            scale,
            reference,
            width,
        }
    }

    /// True for CCITT IA5 character data
    pub fn is_character(&self) -> bool {
        self.unit == "CCITT IA5"
    }

    /// True for code- and flag-table entries, which carry no unit
    pub fn is_code_or_flag(&self) -> bool {
        matches!(self.unit, "Code table" | "Flag table")
    }
}

/// A Table D sequence descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceSpec {
    /// Numeric descriptor code (F = 3)
    pub code: u32,
    /// WMO sequence title
    pub name: &'static str,
    /// Component descriptors in numeric form
    pub descriptors: &'static [u32],
}

/// Table B subset, ordered by descriptor code
pub const TABLE_B: &[ElementSpec] = &[
    ElementSpec::new(1001, "blockNumber", "Numeric", 0, 0, 7),
    ElementSpec::new(1002, "stationNumber", "Numeric", 0, 0, 10),
    ElementSpec::new(1015, "stationOrSiteName", "CCITT IA5", 0, 0, 160),
    ElementSpec::new(2001, "stationType", "Code table", 0, 0, 2),
    ElementSpec::new(2002, "instrumentationForWindMeasurement", "Flag table", 0, 0, 4),
    ElementSpec::new(2004, "instrumentationForEvaporationMeasurement", "Code table", 0, 0, 4),
    ElementSpec::new(4001, "year", "a", 0, 0, 12),
    ElementSpec::new(4002, "month", "mon", 0, 0, 4),
    ElementSpec::new(4003, "day", "d", 0, 0, 6),
    ElementSpec::new(4004, "hour", "h", 0, 0, 5),
    ElementSpec::new(4005, "minute", "min", 0, 0, 6),
    ElementSpec::new(4024, "timePeriod", "h", 0, -2048, 12),
    ElementSpec::new(4025, "timePeriod", "min", 0, -2048, 12),
    ElementSpec::new(5001, "latitude", "deg", 5, -9_000_000, 25),
    ElementSpec::new(5021, "bearingOrAzimuth", "Degree true", 2, 0, 16),
    ElementSpec::new(6001, "longitude", "deg", 5, -18_000_000, 26),
    ElementSpec::new(7004, "pressure", "Pa", -1, 0, 14),
    ElementSpec::new(7021, "elevation", "deg", 2, -9_000, 15),
    ElementSpec::new(7030, "heightOfStationGroundAboveMeanSeaLevel", "m", 1, -4_000, 17),
    ElementSpec::new(7031, "heightOfBarometerAboveMeanSeaLevel", "m", 1, -4_000, 17),
    ElementSpec::new(
        7032,
        "heightOfSensorAboveLocalGroundOrDeckOfMarinePlatform",
        "m",
        2,
        0,
        16,
    ),
    ElementSpec::new(8002, "verticalSignificanceSurfaceObservations", "Code table", 0, 0, 6),
    ElementSpec::new(8021, "timeSignificance", "Code table", 0, 0, 5),
    ElementSpec::new(10004, "nonCoordinatePressure", "Pa", -1, 0, 14),
    ElementSpec::new(10009, "nonCoordinateGeopotentialHeight", "gpm", 0, -1_000, 17),
    ElementSpec::new(10051, "pressureReducedToMeanSeaLevel", "Pa", -1, 0, 14),
    ElementSpec::new(10061, "3HourPressureChange", "Pa", -1, -500, 10),
    ElementSpec::new(10062, "24HourPressureChange", "Pa", -1, -1_000, 11),
    ElementSpec::new(10063, "characteristicOfPressureTendency", "Code table", 0, 0, 4),
    ElementSpec::new(11001, "windDirection", "Degree true", 0, 0, 9),
    ElementSpec::new(11002, "windSpeed", "m s-1", 1, 0, 12),
    ElementSpec::new(11041, "maximumWindGustSpeed", "m s-1", 1, 0, 12),
    ElementSpec::new(11043, "maximumWindGustDirection", "Degree true", 0, 0, 9),
    ElementSpec::new(12049, "temperatureChangeOverSpecifiedPeriod", "K", 0, -30, 6),
    ElementSpec::new(12101, "airTemperature", "K", 2, 0, 16),
    ElementSpec::new(12103, "dewpointTemperature", "K", 2, 0, 16),
    ElementSpec::new(
        12111,
        "maximumTemperatureAtHeightAndOverPeriodSpecified",
        "K",
        2,
        0,
        16,
    ),
    ElementSpec::new(
        12112,
        "minimumTemperatureAtHeightAndOverPeriodSpecified",
        "K",
        2,
        0,
        16,
    ),
    ElementSpec::new(12113, "groundMinimumTemperaturePast12Hours", "K", 2, 0, 16),
    ElementSpec::new(13003, "relativeHumidity", "%", 0, 0, 7),
    ElementSpec::new(13011, "totalPrecipitationOrTotalWaterEquivalent", "kg m-2", 1, -1, 14),
    ElementSpec::new(13013, "totalSnowDepth", "m", 2, -2, 16),
    ElementSpec::new(13023, "totalPrecipitationPast24Hours", "kg m-2", 1, -1, 14),
    ElementSpec::new(13033, "evaporation", "kg m-2", 1, 0, 10),
    ElementSpec::new(
        14002,
        "longWaveRadiationIntegratedOverPeriodSpecified",
        "J m-2",
        -3,
        -65_536,
        17,
    ),
    ElementSpec::new(
        14004,
        "shortWaveRadiationIntegratedOverPeriodSpecified",
        "J m-2",
        -3,
        -65_536,
        17,
    ),
    ElementSpec::new(
        14016,
        "netRadiationIntegratedOverPeriodSpecified",
        "J m-2",
        -4,
        -16_384,
        15,
    ),
    ElementSpec::new(
        14028,
        "globalSolarRadiationIntegratedOverPeriodSpecified",
        "J m-2",
        -2,
        0,
        20,
    ),
    ElementSpec::new(
        14029,
        "diffuseSolarRadiationIntegratedOverPeriodSpecified",
        "J m-2",
        -2,
        0,
        20,
    ),
    ElementSpec::new(
        14030,
        "directSolarRadiationIntegratedOverPeriodSpecified",
        "J m-2",
        -2,
        0,
        20,
    ),
    ElementSpec::new(14031, "totalSunshine", "min", 0, 0, 11),
    ElementSpec::new(20001, "horizontalVisibility", "m", -1, 0, 13),
    ElementSpec::new(20003, "presentWeather", "Code table", 0, 0, 9),
    ElementSpec::new(20004, "pastWeather1", "Code table", 0, 0, 5),
    ElementSpec::new(20005, "pastWeather2", "Code table", 0, 0, 5),
    ElementSpec::new(20010, "cloudCoverTotal", "%", 0, 0, 7),
    ElementSpec::new(20011, "cloudAmount", "Code table", 0, 0, 4),
    ElementSpec::new(20012, "cloudType", "Code table", 0, 0, 6),
    ElementSpec::new(20013, "heightOfBaseOfCloud", "m", -1, -40, 11),
    ElementSpec::new(20014, "heightOfTopOfCloud", "m", -1, -40, 11),
    ElementSpec::new(20017, "cloudTopDescription", "Code table", 0, 0, 4),
    ElementSpec::new(
        20054,
        "trueDirectionFromWhichAPhenomenonOrCloudsAreMovingOrInWhichTheyAreObserved",
        "Degree true",
        0,
        0,
        9,
    ),
    ElementSpec::new(20062, "stateOfGround", "Code table", 0, 0, 5),
    ElementSpec::new(31001, "delayedDescriptorReplicationFactor", "Numeric", 0, 0, 8),
];

/// Table D subset, ordered by descriptor code
pub const TABLE_D: &[SequenceSpec] = &[
    SequenceSpec {
        code: 301004,
        name: "Surface station identification",
        descriptors: &[1001, 1002, 1015, 2001],
    },
    SequenceSpec {
        code: 301011,
        name: "Year, month, day",
        descriptors: &[4001, 4002, 4003],
    },
    SequenceSpec {
        code: 301012,
        name: "Hour, minute",
        descriptors: &[4004, 4005],
    },
    SequenceSpec {
        code: 301021,
        name: "Latitude and longitude (high accuracy)",
        descriptors: &[5001, 6001],
    },
    SequenceSpec {
        code: 301090,
        name: "Fixed surface station identification, time, coordinates",
        descriptors: &[301004, 301011, 301012, 301021, 7030, 7031],
    },
    SequenceSpec {
        code: 302001,
        name: "Pressure and 3-hour pressure change",
        descriptors: &[10004, 10051, 10061, 10063],
    },
    SequenceSpec {
        code: 302004,
        name: "General cloud information",
        descriptors: &[20010, 8002, 20011, 20013, 20012, 20012, 20012],
    },
    SequenceSpec {
        code: 302005,
        name: "Cloud layer",
        descriptors: &[8002, 20011, 20012, 20013],
    },
    SequenceSpec {
        code: 302031,
        name: "Pressure data",
        descriptors: &[302001, 10062, 7004, 10009],
    },
    SequenceSpec {
        code: 302032,
        name: "Temperature and humidity data",
        descriptors: &[7032, 12101, 12103, 13003],
    },
    SequenceSpec {
        code: 302033,
        name: "Visibility data",
        descriptors: &[7032, 20001],
    },
    SequenceSpec {
        code: 302034,
        name: "Precipitation past 24 hours",
        descriptors: &[7032, 13023],
    },
    SequenceSpec {
        code: 302035,
        name: "Basic synoptic instantaneous data",
        descriptors: &[302032, 302033, 302034, 7032, 302004, 101000, 31001, 302005],
    },
    SequenceSpec {
        code: 302036,
        name: "Clouds with bases below station level",
        descriptors: &[105000, 31001, 8002, 20011, 20012, 20014, 20017],
    },
    SequenceSpec {
        code: 302037,
        name: "State of ground, snow depth, ground minimum temperature",
        descriptors: &[20062, 13013, 12113],
    },
    SequenceSpec {
        code: 302038,
        name: "Present and past weather",
        descriptors: &[20003, 4024, 20004, 20005],
    },
    SequenceSpec {
        code: 302039,
        name: "Sunshine data over a period",
        descriptors: &[4024, 14031],
    },
    SequenceSpec {
        code: 302040,
        name: "Precipitation measurement",
        descriptors: &[7032, 102002, 4024, 13011],
    },
    SequenceSpec {
        code: 302041,
        name: "Extreme temperature data",
        descriptors: &[7032, 4024, 4024, 12111, 4024, 4024, 12112],
    },
    SequenceSpec {
        code: 302042,
        name: "Wind data",
        descriptors: &[7032, 2002, 8021, 4025, 11001, 11002, 8021, 103002, 4025, 11043, 11041],
    },
    SequenceSpec {
        code: 302043,
        name: "Basic synoptic period data",
        descriptors: &[302038, 101002, 302039, 302040, 302041, 302042, 7032],
    },
    SequenceSpec {
        code: 302044,
        name: "Evaporation data",
        descriptors: &[4024, 2004, 13033],
    },
    SequenceSpec {
        code: 302045,
        name: "Radiation data over a period",
        descriptors: &[4024, 14002, 14004, 14016, 14028, 14029, 14030],
    },
    SequenceSpec {
        code: 302046,
        name: "Temperature change over a period",
        descriptors: &[4024, 4024, 12049],
    },
    SequenceSpec {
        code: 302047,
        name: "Direction of cloud drift",
        descriptors: &[102003, 8002, 20054],
    },
    SequenceSpec {
        code: 302048,
        name: "Direction and elevation of cloud",
        descriptors: &[5021, 7021, 20012, 5021, 7021],
    },
    SequenceSpec {
        code: 307080,
        name: "Synoptic report from a fixed land station",
        descriptors: &[
            301090, 302031, 302035, 302036, 302047, 8002, 302048, 302037, 302043, 302044, 101002,
            302045, 302046,
        ],
    },
];

/// Look up a Table B element by numeric code
pub fn find_element(code: u32) -> Option<&'static ElementSpec> {
    TABLE_B
        .binary_search_by_key(&code, |spec| spec.code)
        .ok()
        .map(|idx| &TABLE_B[idx])
}

/// Look up a Table D sequence by numeric code
pub fn find_sequence(code: u32) -> Option<&'static SequenceSpec> {
    TABLE_D
        .binary_search_by_key(&code, |spec| spec.code)
        .ok()
        .map(|idx| &TABLE_D[idx])
}
