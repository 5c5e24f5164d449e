use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdMapPin, LdSearch};
use dioxus_free_icons::Icon;
use shared_ui::{Button, ButtonVariant, Card, CardContent, FormSelect, Input, SelectOption};
use wizard::FilterOption;

fn select_options(options: Vec<FilterOption>) -> Vec<SelectOption> {
    options
        .into_iter()
        .map(|o| SelectOption::new(o.value, o.label))
        .collect()
}

#[derive(Clone, PartialEq)]
struct LocationRow {
    id: String,
    name: String,
    place: String,
    active: bool,
}

/// Step 1: narrow the location list and pick one.
#[component]
pub fn LocationStep(loading: bool) -> Element {
    let auth = use_auth();
    let mut wizard = auth.wizard;

    let (department, city, query, filtering, departments, cities, rows, locked) = {
        let w = wizard.read();
        let filter = w.filter();
        let selected = w.session().location_id();
        let rows: Vec<LocationRow> = w
            .filtered_locations()
            .into_iter()
            .map(|l| LocationRow {
                id: l.id.clone(),
                name: l.name.clone(),
                place: format!("{}, {}", l.city, l.department),
                active: selected == Some(l.id.as_str()),
            })
            .collect();
        (
            filter.department().to_string(),
            filter.city().to_string(),
            filter.query().to_string(),
            filter.is_active(),
            select_options(w.department_options()),
            select_options(w.city_options()),
            rows,
            w.session().is_location_locked(),
        )
    };
    let total = wizard.read().locations().len();
    let shown = rows.len();

    rsx! {
        Card {
            title: "Where are you working?",
            subtitle: "Filter by department and city, then pick the location.",
            CardContent {
                div { class: "location-filters",
                    FormSelect {
                        label: "Department",
                        value: department,
                        options: departments,
                        on_change: move |v: String| wizard.write().set_department(&v),
                    }
                    FormSelect {
                        label: "City",
                        value: city,
                        options: cities,
                        on_change: move |v: String| wizard.write().set_city(&v),
                    }
                    div { class: "location-search",
                        Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                        Input {
                            placeholder: "Search by name",
                            value: query,
                            on_input: move |e: FormEvent| wizard.write().set_query(&e.value()),
                        }
                    }
                    if filtering {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| wizard.write().clear_filters(),
                            "Clear filters"
                        }
                    }
                }

                p { class: "location-count", "{shown} of {total} locations" }
                if locked {
                    p { class: "location-locked",
                        "This visit already has uploads for the selected location. Start over to pick another one."
                    }
                }

                if loading && total == 0 {
                    p { class: "location-empty", "Loading locations..." }
                } else if rows.is_empty() {
                    p { class: "location-empty", "No locations match these filters." }
                } else {
                    ul { class: "location-list", role: "listbox",
                        for row in rows {
                            LocationItem { key: "{row.id}", row }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LocationItem(row: LocationRow) -> Element {
    let auth = use_auth();
    let mut wizard = auth.wizard;
    let id = row.id.clone();
    let active = row.active;

    rsx! {
        li {
            class: if active { "location-item active" } else { "location-item" },
            role: "option",
            "aria-selected": active,
            onclick: move |_| {
                if !active {
                    wizard.write().select_location(Some(&id));
                }
            },
            Icon::<LdMapPin> { icon: LdMapPin, width: 18, height: 18 }
            div { class: "location-item-text",
                span { class: "location-name", "{row.name}" }
                span { class: "location-place", "{row.place}" }
            }
        }
    }
}
