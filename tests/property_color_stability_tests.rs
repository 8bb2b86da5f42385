use std::collections::HashMap;

use power_mix_chart::api::{ChartController, PipelineConfig};
use power_mix_chart::render::{Color, NullRenderer};
use power_mix_chart::series::SeriesKind;
use proptest::prelude::*;

const MONTHLY: &str = "\
Country,Time,Balance,Product,Value
France,January 2021,Net Electricity Production,Nuclear,30000
France,February 2021,Net Electricity Production,Nuclear,28000
France,January 2021,Net Electricity Production,Hydro,6000
France,February 2021,Net Electricity Production,Hydro,7000
France,January 2021,Net Electricity Production,Wind,3000
France,February 2021,Net Electricity Production,Wind,4100
France,January 2021,Net Electricity Production,Solar,900
France,March 2021,Net Electricity Production,Solar,1500
France,January 2021,Final Consumption (Calculated),Electricity,41000
France,February 2021,Final Consumption (Calculated),Electricity,39000
Germany,January 2021,Net Electricity Production,Coal,12000
Germany,January 2021,Net Electricity Production,Wind,14000
Germany,February 2021,Net Electricity Production,Solar,2500
Germany,January 2021,Final Consumption (Calculated),Electricity,45000
";

#[derive(Debug, Clone)]
enum Action {
    Toggle(usize),
    Overlay(bool),
    SelectAll,
    Country(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..8).prop_map(Action::Toggle),
        any::<bool>().prop_map(Action::Overlay),
        Just(Action::SelectAll),
        (0usize..2).prop_map(Action::Country),
    ]
}

fn apply(controller: &mut ChartController<NullRenderer>, action: &Action) {
    match action {
        Action::Toggle(idx) => {
            let checklist = controller.checklist();
            if !checklist.is_empty() {
                let name = checklist[idx % checklist.len()].name.clone();
                controller.toggle_category(&name).expect("toggle");
            }
        }
        Action::Overlay(show) => controller.set_overlay(*show).expect("overlay"),
        Action::SelectAll => controller.toggle_select_all().expect("select all"),
        Action::Country(idx) => {
            let country = controller.countries()[idx % controller.countries().len()].clone();
            controller.select_country(&country).expect("country");
        }
    }
}

proptest! {
    #[test]
    fn drawn_colors_never_change_across_renders(
        actions in prop::collection::vec(action(), 1..40),
    ) {
        let mut controller =
            ChartController::from_text(MONTHLY, NullRenderer::default(), PipelineConfig::default())
                .expect("controller");
        let overlay_color = controller.config().style.overlay_color;
        let mut seen: HashMap<String, Color> = HashMap::new();

        for action in &actions {
            apply(&mut controller, action);

            let geometry = controller.geometry().expect("geometry");
            for drawn in &geometry.series {
                match drawn.kind {
                    SeriesKind::Production => {
                        let assigned = controller.colors().color_of(&drawn.key);
                        prop_assert_eq!(Some(drawn.color), assigned);
                        let first = *seen.entry(drawn.key.clone()).or_insert(drawn.color);
                        prop_assert_eq!(first, drawn.color);
                    }
                    SeriesKind::Overlay => {
                        prop_assert_eq!(drawn.color, overlay_color);
                    }
                }
            }
        }
    }
}
