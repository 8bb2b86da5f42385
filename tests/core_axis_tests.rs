use approx::assert_relative_eq;
use power_mix_chart::core::{
    LinearScale, Margins, PlotArea, TemporalPoint, ValueFormat, Viewport, decimals_for_step,
    group_thousands, nice_step, nice_ticks, nice_upper_bound, temporal_ticks,
};
use proptest::prelude::*;

fn month(year: i32, month: u32) -> TemporalPoint {
    TemporalPoint::month(year, month).expect("month")
}

fn year(year: i32) -> TemporalPoint {
    TemporalPoint::year(year).expect("year")
}

#[test]
fn month_year_text_parses_with_chrono_pattern() {
    assert_eq!(
        TemporalPoint::parse_month_year("January 2021", "%B %Y"),
        Some(month(2021, 1))
    );
    assert_eq!(
        TemporalPoint::parse_month_year(" December 1999 ", "%B %Y"),
        Some(month(1999, 12))
    );
    assert_eq!(TemporalPoint::parse_month_year("", "%B %Y"), None);
    assert_eq!(TemporalPoint::parse_month_year("Smarch 2021", "%B %Y"), None);
    assert_eq!(TemporalPoint::parse_year("2020"), Some(year(2020)));
    assert_eq!(TemporalPoint::parse_year("twenty"), None);
    assert!(TemporalPoint::month(2021, 13).is_err());
}

#[test]
fn points_order_advance_and_label() {
    assert!(month(2020, 12) < month(2021, 1));
    assert!(year(2020) < month(2020, 1));
    assert_eq!(month(2021, 11).advance(3), month(2022, 2));
    assert_eq!(year(2019).advance(2), year(2021));
    assert_eq!(month(2021, 3).label(), "Mar 2021");
    assert_eq!(year(2021).to_string(), "2021");
    assert_eq!(month(1970, 1).axis_value(), 0.0);
    assert!(month(2021, 2).axis_value() > month(2021, 1).axis_value());
}

#[test]
fn thousands_grouping_and_units() {
    assert_eq!(group_thousands(1_234_567.0, 0), "1,234,567");
    assert_eq!(group_thousands(999.0, 0), "999");
    assert_eq!(group_thousands(12.5, 2), "12.50");
    assert_eq!(group_thousands(-1_234.5, 1), "-1,234.5");
    assert_eq!(group_thousands(-0.0001, 2), "0.00");
    assert_eq!(ValueFormat::gigawatt_hours().format(41_000.4), "41,000 GWh");
    assert_eq!(ValueFormat::terawatt_hours().format(1_004.2571), "1,004.26 TWh");
    assert_eq!(ValueFormat::new("", 1).format(3.26), "3.3");
}

#[test]
fn decimals_follow_tick_step() {
    assert_eq!(decimals_for_step(50.0), 0);
    assert_eq!(decimals_for_step(1.0), 0);
    assert_eq!(decimals_for_step(0.5), 1);
    assert_eq!(decimals_for_step(0.05), 2);
}

#[test]
fn nice_steps_and_bounds() {
    assert_relative_eq!(nice_step(12.3), 10.0);
    assert_relative_eq!(nice_step(0.42), 0.5);
    assert_relative_eq!(nice_step(1.6), 2.0);
    assert_relative_eq!(nice_step(80.0), 100.0);
    assert_eq!(nice_step(0.0), 0.0);

    assert_relative_eq!(nice_upper_bound(120.0, 10), 120.0);
    assert_relative_eq!(nice_upper_bound(123.0, 10), 130.0);
    assert_relative_eq!(nice_upper_bound(1_200.0, 10), 1_200.0);
    assert_relative_eq!(nice_upper_bound(62.0, 10), 65.0);

    assert_eq!(
        nice_ticks(0.0, 100.0, 5),
        vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
    assert_eq!(nice_ticks(5.0, 5.0, 4), vec![5.0]);
    assert!(nice_ticks(0.0, 1.0, 0).is_empty());
}

#[test]
fn monthly_ticks_align_to_calendar_step() {
    let every_month = temporal_ticks(month(2021, 1), month(2021, 12), 12);
    assert_eq!(every_month.len(), 12);

    let quarterly = temporal_ticks(month(2021, 1), month(2021, 12), 4);
    assert_eq!(
        quarterly,
        vec![month(2021, 1), month(2021, 4), month(2021, 7), month(2021, 10)]
    );

    let offset = temporal_ticks(month(2021, 2), month(2021, 12), 4);
    assert_eq!(offset.first(), Some(&month(2021, 4)));
}

#[test]
fn yearly_ticks_use_round_years() {
    let ticks = temporal_ticks(year(2000), year(2020), 5);
    assert_eq!(
        ticks,
        vec![year(2000), year(2005), year(2010), year(2015), year(2020)]
    );
    assert_eq!(temporal_ticks(year(2021), year(2021), 5), vec![year(2021)]);
}

#[test]
fn plot_area_and_scale_map_between_pixels_and_values() {
    let plot = PlotArea::from_viewport(Viewport::new(960, 500), Margins::default()).expect("plot");
    assert_eq!((plot.left, plot.top, plot.width, plot.height), (70.0, 20.0, 690.0, 440.0));
    assert!(plot.contains(plot.right(), plot.bottom()));
    assert!(!plot.contains(plot.left - 1.0, plot.top));

    let y = LinearScale::new((0.0, 1_200.0), (plot.bottom(), plot.top)).expect("scale");
    assert_relative_eq!(y.domain_to_pixel(600.0).expect("pixel"), 240.0);
    assert_relative_eq!(y.pixel_to_domain(240.0).expect("value"), 600.0);

    assert!(LinearScale::new((1.0, 1.0), (0.0, 10.0)).is_err());
    assert!(PlotArea::from_viewport(Viewport::new(200, 50), Margins::default()).is_err());
}

proptest! {
    #[test]
    fn nice_upper_bound_never_shrinks(max in 0.001f64..1e9, count in 1usize..20) {
        let upper = nice_upper_bound(max, count);
        prop_assert!(upper.is_finite());
        prop_assert!(upper >= max * (1.0 - 1e-12));
    }

    #[test]
    fn grouped_output_round_trips_through_parse(value in -1e12f64..1e12, decimals in 0usize..4) {
        let grouped = group_thousands(value, decimals);
        let parsed: f64 = grouped.replace(',', "").parse().expect("numeric text");
        prop_assert!((parsed - value).abs() <= 0.5 * 10f64.powi(-(decimals as i32)) + 1e-3);
    }
}
