//! Integration tests for the observation-to-BUFR encoding pipeline
//!
//! These tests run observation text through the parser, message builder and
//! encoder, then verify the emitted BUFR edition 4 framing and packed values
//! bit by bit against the SYNOP land station template.

use bufr_exporter::app::services::lookup::LookupTable;
use bufr_exporter::app::services::message_builder::MessageBuilder;
use bufr_exporter::app::services::obs_parser::ObsParser;
use bufr_exporter::bufr::bits::{BitReader, missing_pattern};
use bufr_exporter::bufr::template::expand_template;
use bufr_exporter::config::Config;
use bufr_exporter::constants::{CLOUD_BELOW_STATION_COUNT, CLOUD_LAYER_COUNT, SYNOP_LAND_TEMPLATE};

/// Column header of the standard hourly transmission format
const HEADER: &str = "Year MonthOfYear DayOfMonth HourOfDay(UTC) AirTemperature(C) \
                      AirPressure(hPa) RelativeHumidity(%) WindSpeed(m/s) WindDirection(d) \
                      CloudCover ShortwaveRadiationDown_Cor(W/m2) ShortwaveRadiationUp_Cor(W/m2) \
                      LongwaveRadiationDown(W/m2) LongwaveRadiationUp(W/m2) LatitudeGPS(degN) \
                      LongitudeGPS(degW) ElevationGPS(m) HeightSensorBoom(m)";

/// One fully populated observation row for 2023-06-15 12:00 UTC
const FULL_ROW: &str = "2023 6 15 12 -9.7 984.2 67 4.1 210 78 312.0 215.0 288.4 301.2 \
                        67.0666 50.1 665.0 2.6";

/// A row where every measurement is the -999 sentinel (or NaN), with only
/// the location block intact
const SENTINEL_ROW: &str = "2023 6 15 13 -999 -999.0 -999 -999 -999 -999 -999 -999 NaN -999 \
                            67.0666 50.1 665.0 2.6";

fn content(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

fn default_builder() -> MessageBuilder {
    let config = Config::default();
    MessageBuilder::new(
        config.station.clone(),
        config.encoding.to_message_config(),
        LookupTable::built_in(),
    )
    .expect("default configuration builds")
}

fn encode_rows(rows: &[&str]) -> Vec<Vec<u8>> {
    let parser = ObsParser::new();
    let result = parser.parse_content(&content(rows)).expect("rows parse");
    assert_eq!(result.observations.len(), rows.len());

    let builder = default_builder();
    result
        .observations
        .iter()
        .map(|obs| {
            let (message, _) = builder.build(obs).expect("observation builds");
            message.encode().expect("message encodes")
        })
        .collect()
}

/// Read the packed value of one template slot straight from the bit stream
fn packed(encoded: &[u8], name: &str, occurrence: usize) -> u64 {
    let slots = expand_template(
        SYNOP_LAND_TEMPLATE,
        &[CLOUD_LAYER_COUNT, CLOUD_BELOW_STATION_COUNT],
    )
    .expect("template expands");

    // section 4 data starts after sections 0 (8), 1 (22), 3 (9) and the
    // 4-octet section 4 header
    let mut reader = BitReader::new(&encoded[43..encoded.len() - 4]);
    for slot in slots {
        if slot.spec.name == name && slot.occurrence == occurrence {
            return reader.read_bits(slot.spec.width).expect("read packed value");
        }
        // character slots are wider than one read allows
        let mut left = slot.spec.width;
        while left > 64 {
            reader.skip_bits(64).expect("skip slot");
            left -= 64;
        }
        reader.skip_bits(left).expect("skip slot");
    }
    panic!("slot {name} #{occurrence} not in template expansion");
}

/// Test BUFR edition 4 framing of a single encoded observation
///
/// Purpose: Validate section lengths, identification and the template
/// descriptor against the WMO layout byte by byte
/// Benefit: Guarantees downstream GTS tooling can delimit and route the file
#[test]
fn test_single_observation_framing() {
    let encoded = encode_rows(&[FULL_ROW]).remove(0);

    assert_eq!(&encoded[0..4], b"BUFR");
    assert_eq!(&encoded[encoded.len() - 4..], b"7777");
    let declared = u32::from_be_bytes([0, encoded[4], encoded[5], encoded[6]]) as usize;
    assert_eq!(declared, encoded.len());
    assert_eq!(encoded[7], 4);

    // section 1 carries the observation timestamp, not the wall clock
    assert_eq!(&encoded[8..11], &[0, 0, 22]);
    assert_eq!(u16::from_be_bytes([encoded[12], encoded[13]]), 98);
    assert_eq!(u16::from_be_bytes([encoded[23], encoded[24]]), 2023);
    assert_eq!(&encoded[25..30], &[6, 15, 12, 0, 0]);

    // section 3: one observed, uncompressed subset of 3 07 080
    assert_eq!(&encoded[30..33], &[0, 0, 9]);
    assert_eq!(u16::from_be_bytes([encoded[34], encoded[35]]), 1);
    assert_eq!(encoded[36], 0x80);
    assert_eq!(&encoded[37..39], &[0xc7, 0x50]);
}

/// Test station identity and location fields of an encoded observation
///
/// Purpose: Validate the configured station block, WIGOS-style numbering and
/// GPS-derived location reach the right template slots
/// Benefit: Ensures messages are attributable to the correct station
#[test]
fn test_station_identity_and_location_packed() {
    let encoded = encode_rows(&[FULL_ROW]).remove(0);

    assert_eq!(packed(&encoded, "blockNumber", 1), 1);
    assert_eq!(packed(&encoded, "stationNumber", 1), 1);
    assert_eq!(packed(&encoded, "stationType", 1), 0);
    assert_eq!(packed(&encoded, "instrumentationForWindMeasurement", 1), 6);

    // latitude 67.0666 degN, longitude 50.1 degW negated to degE
    assert_eq!(packed(&encoded, "latitude", 1), 15_706_660);
    assert_eq!(packed(&encoded, "longitude", 1), 12_990_000);

    // station ground at 665.0 m, barometer at ground + boom
    assert_eq!(
        packed(&encoded, "heightOfStationGroundAboveMeanSeaLevel", 1),
        10_650
    );
    assert_eq!(
        packed(&encoded, "heightOfBarometerAboveMeanSeaLevel", 1),
        10_676
    );
}

/// Test unit conversion and scaling of the core measurements
///
/// Purpose: Validate Celsius-to-Kelvin, hectopascal-to-pascal and the Table B
/// scale/reference/width packing end to end
/// Benefit: Catches conversion regressions that would corrupt every message
#[test]
fn test_measurements_converted_and_packed() {
    let encoded = encode_rows(&[FULL_ROW]).remove(0);

    // -9.7 C -> 263.45 K at scale 2
    assert_eq!(packed(&encoded, "airTemperature", 1), 26_345);
    // 984.2 hPa -> 98420 Pa at scale -1
    assert_eq!(packed(&encoded, "nonCoordinatePressure", 1), 9_842);
    assert_eq!(packed(&encoded, "relativeHumidity", 1), 67);
    assert_eq!(packed(&encoded, "windSpeed", 1), 41);
    assert_eq!(packed(&encoded, "windDirection", 1), 210);
    assert_eq!(packed(&encoded, "cloudCoverTotal", 1), 78);
}

/// Test the derived sensor heights and period metadata
///
/// Purpose: Validate boom-height arithmetic and the wind/radiation period
/// conventions of the synoptic template
/// Benefit: Receivers interpret measurements at the correct height and
/// averaging period
#[test]
fn test_sensor_heights_and_periods_derived() {
    let encoded = encode_rows(&[FULL_ROW]).remove(0);
    let height = "heightOfSensorAboveLocalGroundOrDeckOfMarinePlatform";

    // temperature/humidity at the boom, visibility 0.1 m below, wind 0.4 m above
    assert_eq!(packed(&encoded, height, 1), 260);
    assert_eq!(packed(&encoded, height, 2), 250);
    assert_eq!(packed(&encoded, height, 7), 300);

    // wind averaged over the 10 minutes before the observation
    assert_eq!(packed(&encoded, "timePeriod", 10), 2_038);
    assert_eq!(packed(&encoded, "timeSignificance", 1), 2);
    assert_eq!(
        packed(&encoded, "timeSignificance", 2),
        missing_pattern(5),
        "the second time significance stays cancelled"
    );

    // radiation integrated over the previous hour, both replications
    assert_eq!(packed(&encoded, "timePeriod", 14), 2_047);
    assert_eq!(packed(&encoded, "timePeriod", 15), 2_047);

    // replication factors: one cloud layer, no clouds below station
    assert_eq!(packed(&encoded, "delayedDescriptorReplicationFactor", 1), 1);
    assert_eq!(packed(&encoded, "delayedDescriptorReplicationFactor", 2), 0);
}

/// Test that radiation slots are populated rather than missing
///
/// Purpose: Validate the downward/upward split across the two radiation
/// replications, with values forwarded as supplied
/// Benefit: Distinguishes an absent sensor from a zero reading
#[test]
fn test_radiation_slots_populated() {
    let encoded = encode_rows(&[FULL_ROW]).remove(0);
    let short = "shortWaveRadiationIntegratedOverPeriodSpecified";
    let long = "longWaveRadiationIntegratedOverPeriodSpecified";

    for (key, rank) in [(short, 1), (short, 2), (long, 1), (long, 2)] {
        let value = packed(&encoded, key, rank);
        assert_ne!(value, missing_pattern(17), "{key} #{rank} should be set");
        // W/m2 magnitudes round to the reference value at scale -3
        assert_eq!(value, 65_536);
    }
}

/// Test that sentinel and NaN measurements encode as BUFR missing values
///
/// Purpose: Validate the -999 sentinel, its -999.0 spelling and NaN all map
/// to all-ones fields while the location block stays intact
/// Benefit: No sentinel magnitude can masquerade as a real measurement
#[test]
fn test_sentinel_values_become_missing() {
    let encoded = encode_rows(&[SENTINEL_ROW]).remove(0);

    assert_eq!(packed(&encoded, "airTemperature", 1), missing_pattern(16));
    assert_eq!(
        packed(&encoded, "nonCoordinatePressure", 1),
        missing_pattern(14)
    );
    assert_eq!(packed(&encoded, "relativeHumidity", 1), missing_pattern(7));
    assert_eq!(packed(&encoded, "windSpeed", 1), missing_pattern(12));
    assert_eq!(packed(&encoded, "windDirection", 1), missing_pattern(9));
    assert_eq!(packed(&encoded, "cloudCoverTotal", 1), missing_pattern(7));
    assert_eq!(
        packed(&encoded, "shortWaveRadiationIntegratedOverPeriodSpecified", 1),
        missing_pattern(17)
    );

    // no wind or radiation means no period metadata either
    assert_eq!(packed(&encoded, "timePeriod", 10), missing_pattern(12));
    assert_eq!(packed(&encoded, "timeSignificance", 1), missing_pattern(5));
    assert_eq!(packed(&encoded, "timePeriod", 14), missing_pattern(12));
    assert_eq!(packed(&encoded, "timePeriod", 15), missing_pattern(12));

    // the location block still encodes
    assert_eq!(packed(&encoded, "latitude", 1), 15_706_660);
    assert_eq!(
        packed(&encoded, "heightOfBarometerAboveMeanSeaLevel", 1),
        10_676
    );
    assert_eq!(
        packed(
            &encoded,
            "heightOfSensorAboveLocalGroundOrDeckOfMarinePlatform",
            2
        ),
        250
    );
}

/// Test that consecutive records form a self-delimiting message stream
///
/// Purpose: Validate messages concatenate in row order and can be split back
/// using only the section 0 length
/// Benefit: Matches how BUFR files are consumed, one message at a time
#[test]
fn test_records_form_self_delimiting_stream() {
    let rows = [
        "2023 6 15 10 -9.7 984.2 67 4.1 210 78 312.0 215.0 288.4 301.2 67.0666 50.1 665.0 2.6",
        "2023 6 15 11 -9.4 984.6 69 3.8 215 80 305.0 210.0 290.1 300.8 67.0666 50.1 665.0 2.6",
        FULL_ROW,
    ];
    let messages = encode_rows(&rows);

    let mut stream = Vec::new();
    for message in &messages {
        stream.extend_from_slice(message);
    }

    let mut offset = 0;
    let mut hours = Vec::new();
    while offset < stream.len() {
        assert_eq!(&stream[offset..offset + 4], b"BUFR");
        let len = u32::from_be_bytes([
            0,
            stream[offset + 4],
            stream[offset + 5],
            stream[offset + 6],
        ]) as usize;
        let message = &stream[offset..offset + len];
        assert_eq!(&message[message.len() - 4..], b"7777");
        hours.push(message[27]);
        offset += len;
    }

    assert_eq!(offset, stream.len());
    assert_eq!(hours, vec![10, 11, 12]);
}

/// Test the async file-reading entry point end to end
///
/// Purpose: Validate parse_file drives the same pipeline as parse_content
/// Benefit: Covers the path the encode command actually takes
#[tokio::test]
async fn test_parse_file_to_bufr() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("KAN_L_hour_v03.txt");
    tokio::fs::write(&path, content(&[FULL_ROW]))
        .await
        .expect("write fixture");

    let parser = ObsParser::new();
    let result = parser.parse_file(&path).await.expect("file parses");
    assert_eq!(result.stats.observations_parsed, 1);

    let builder = default_builder();
    let (message, report) = builder
        .build(&result.observations[0])
        .expect("observation builds");
    assert!(report.fields_set > 0);
    assert_eq!(report.fields_missing, 0);

    let encoded = message.encode().expect("message encodes");
    assert_eq!(&encoded[0..4], b"BUFR");
}
