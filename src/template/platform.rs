//! Google Earth Engine script that extracts GPM IMERG rainfall at every
//! registry location. Runs in the Earth Engine code editor, not here.

use std::fmt::Write;

use crate::{
    config::{DEFAULT_END_YEAR, DEFAULT_START_YEAR},
    registry::{all_locations, BASIN_BBOX},
};

const IMERG_COLLECTION: &str = "NASA/GPM_L3/IMERG_V07";
const EXPORT_FOLDER: &str = "Panchganga_Rainfall_Data";

pub fn generate_platform_script() -> String {
    let mut script = String::new();

    // Writing to a String cannot fail.
    let _ = write!(
        script,
        r#"// ============================================================================
// GPM IMERG daily rainfall for the Panchganga basin, one series per taluka
// Google Earth Engine script
// ============================================================================

var startDate = '{start}-01-01';
var endDate = '{end}-12-31';

var basin = ee.Geometry.Rectangle([
  {min_lon}, {min_lat},
  {max_lon}, {max_lat}
]);

var locations = {{
"#,
        start = DEFAULT_START_YEAR,
        end = DEFAULT_END_YEAR,
        min_lon = BASIN_BBOX.min_lon,
        min_lat = BASIN_BBOX.min_lat,
        max_lon = BASIN_BBOX.max_lon,
        max_lat = BASIN_BBOX.max_lat,
    );

    for location in all_locations() {
        let _ = writeln!(
            script,
            "  '{}': ee.Geometry.Point([{}, {}]),",
            location.name, location.longitude, location.latitude
        );
    }

    let _ = write!(
        script,
        r#"}};

var imerg = ee.ImageCollection('{collection}')
  .filterDate(startDate, endDate)
  .select('precipitationCal');

// Half-hourly mm/hr summed over a day, times 0.5 h, gives mm/day.
function extractDailyRainfall(date) {{
  var start = ee.Date(date);
  var end = start.advance(1, 'day');
  var daily = imerg.filterDate(start, end).sum().multiply(0.5);

  var features = Object.keys(locations).map(function(name) {{
    var value = daily.reduceRegion({{
      reducer: ee.Reducer.first(),
      geometry: locations[name],
      scale: 10000
    }}).get('precipitationCal');
    return ee.Feature(null, {{
      'date': start.format('YYYY-MM-dd'),
      'location': name,
      'rainfall_mm': value
    }});
  }});
  return ee.FeatureCollection(features);
}}

var dayCount = ee.Date(endDate).difference(ee.Date(startDate), 'day');
var dates = ee.List.sequence(0, dayCount.subtract(1)).map(function(offset) {{
  return ee.Date(startDate).advance(offset, 'day');
}});
var dailyData = ee.FeatureCollection(dates.map(extractDailyRainfall)).flatten();

Export.table.toDrive({{
  collection: dailyData,
  description: 'Panchganga_Rainfall_Location_Wise_{start}_{end}',
  fileFormat: 'CSV',
  folder: '{folder}'
}});

print('Daily records:', dailyData.size());
print('Daily sample:', dailyData.limit(20));

Map.centerObject(basin, 9);
Map.addLayer(basin, {{color: 'blue'}}, 'Panchganga Basin');
Object.keys(locations).forEach(function(name) {{
  Map.addLayer(locations[name], {{color: 'red'}}, name);
}});

function extractMonthlyRainfall(yearMonth) {{
  yearMonth = ee.List(yearMonth);
  var year = ee.Number(yearMonth.get(0));
  var month = ee.Number(yearMonth.get(1));
  var start = ee.Date.fromYMD(year, month, 1);
  var monthly = imerg.filterDate(start, start.advance(1, 'month')).sum().multiply(0.5);

  var features = Object.keys(locations).map(function(name) {{
    var value = monthly.reduceRegion({{
      reducer: ee.Reducer.first(),
      geometry: locations[name],
      scale: 10000
    }}).get('precipitationCal');
    return ee.Feature(null, {{
      'year': year,
      'month': month,
      'location': name,
      'rainfall_mm': value
    }});
  }});
  return ee.FeatureCollection(features);
}}

var yearMonths = ee.List.sequence({start}, {end}).map(function(year) {{
  return ee.List.sequence(1, 12).map(function(month) {{
    return ee.List([year, month]);
  }});
}}).flatten();
var monthlyData = ee.FeatureCollection(yearMonths.map(extractMonthlyRainfall)).flatten();

Export.table.toDrive({{
  collection: monthlyData,
  description: 'Panchganga_Rainfall_Monthly_Location_Wise_{start}_{end}',
  fileFormat: 'CSV',
  folder: '{folder}'
}});

print('Monthly records:', monthlyData.size());

// ============================================================================
// Usage:
// 1. Open https://code.earthengine.google.com/ and sign in
// 2. Paste this script and press Run
// 3. Start both export tasks from the Tasks tab
// 4. The CSV files arrive in the {folder} folder on Google Drive
// ============================================================================
"#,
        collection = IMERG_COLLECTION,
        start = DEFAULT_START_YEAR,
        end = DEFAULT_END_YEAR,
        folder = EXPORT_FOLDER,
    );

    script
}

// -- Tests -------------------------------------------------------------------
