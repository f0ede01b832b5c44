use crate::city::{CALIFORNIA, CITIES};
use crate::graph::{self, Graph, TempRange};

/// Wall-clock period between graph regenerations.
const REGEN_PERIOD: std::time::Duration = std::time::Duration::from_secs(2);

/// Logical side length of the square map surface.
const MAP_SIZE: f32 = 400.0;

pub struct ClimateApp {
    screen: Screen,
    range: TempRange,
    threshold: i32,
    last_tick: std::time::Instant,
    graph: Graph,
    paused: bool,
    file_save_handle: Option<std::thread::JoinHandle<Option<std::path::PathBuf>>>,
    alert: Option<Alert>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Overview,
    Map,
}

enum Alert {
    Success(String),
    Error(String),
}

impl Default for ClimateApp {
    fn default() -> Self {
        Self {
            screen: Screen::Overview,
            range: TempRange::default(),
            threshold: 5,
            last_tick: std::time::Instant::now(),
            graph: Graph::default(),
            paused: false,
            file_save_handle: None,
            alert: None,
        }
    }
}

impl ClimateApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals {
            dark_mode: true,
            ..Default::default()
        });

        Default::default()
    }
}

impl eframe::App for ClimateApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        // save image
        if self.file_save_handle.is_some() && self.file_save_handle.as_ref().expect("").is_finished() {
            match self.file_save_handle.take().expect("").join() {
                Ok(path) => if let Some(path) = path {
                    let data = self.graph.as_image_raw(MAP_SIZE as usize);
                    let size = MAP_SIZE as u32;

                    self.alert = match image::save_buffer_with_format(path, &data, size, size, image::ColorType::Rgb8, image::ImageFormat::Png) {
                        Ok(_) => Some(Alert::Success("Image saved successfully.".into())),
                        Err(err) => Some(Alert::Error(format!("Failed to save image: {}", err))),
                    };
                },
                Err(_) => {
                    self.alert = Some(Alert::Error("Failed to open file save dialogue.".into()));
                },
            }
        }

        egui::TopBottomPanel::top("screen_tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.screen, Screen::Overview, "Overview");
                if ui.selectable_value(&mut self.screen, Screen::Map, "Climate Map").clicked() {
                    // A fresh period starts whenever the map becomes active.
                    self.last_tick = std::time::Instant::now();
                }
            });
        });

        match self.screen {
            Screen::Overview => self.overview_screen(ctx),
            Screen::Map => self.map_screen(ctx),
        }

        if self.file_save_handle.is_some() {
            // Keep polling the dialogue thread while it is open.
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        } else if self.screen == Screen::Map && !self.paused {
            ctx.request_repaint_after(REGEN_PERIOD.saturating_sub(self.last_tick.elapsed()));
        }
    }
}

impl ClimateApp {
    fn overview_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Climate Change Analysis in California");

                ui.add_space(8.0);

                ui.label(OVERVIEW_INTRO);

                ui.add_space(8.0);

                for paragraph in OVERVIEW_EXPLANATION {
                    ui.label(paragraph);
                    ui.add_space(6.0);
                }

                ui.separator();
            });
        });
    }

    fn map_screen(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("side_panel").show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("California Climate Graph");

                ui.add_space(4.0);

                let mut config_changed = false;

                egui::CollapsingHeader::new("Climate").default_open(true).show(ui, |ui| {
                    ui.label("Max Temperature (°C)");
                    config_changed |= ui.add(egui::Slider::new(&mut self.range.max, 10..=40)).changed();
                    ui.label(format!("Max Temp: {}°C", self.range.max));
                });

                ui.add_space(4.0);

                egui::CollapsingHeader::new("Graph").default_open(true).show(ui, |ui| {
                    ui.label("Edge Threshold (°C difference)");
                    config_changed |= ui.add(egui::Slider::new(&mut self.threshold, 1..=10)).changed();
                    ui.label(format!("Threshold: {}°C", self.threshold));
                });

                ui.add_space(4.0);

                egui::CollapsingHeader::new("Simulation").default_open(true).show(ui, |ui| {
                    if ui.button("Save Image").clicked() {
                        self.file_save_handle = Some(std::thread::spawn(|| {
                            rfd::FileDialog::new()
                                .add_filter("PNG", &["png"])
                                .set_file_name("climate-graph.png")
                                .set_title("Save Climate Graph Image")
                                .save_file()
                        }));
                        self.paused = true;
                    }
                });

                if config_changed {
                    // Dragging a slider restarts the period; the new settings
                    // apply on the next tick, never immediately.
                    self.last_tick = std::time::Instant::now();
                }

                ui.add_space(8.0);
            })
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(alert) = &self.alert {
                let mut alert_closed = false;

                let (title, text) = match alert {
                    Alert::Success(text) => ("Success", text.as_str()),
                    Alert::Error(text) => ("Error", text.as_str()),
                };
                egui::Window::new(title).collapsible(false).show(ctx, |ui| {
                    ui.label(text);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui.button("OK").clicked() {
                            alert_closed = true;
                        }
                    });
                });

                if alert_closed {
                    self.alert = None;
                }
            }

            ui.with_layout(egui::Layout::left_to_right(egui::Align::Min), |ui| {
                if ui.add_enabled(!self.paused, egui::Button::new("Pause").small()).clicked() {
                    self.paused = true;
                }
                if ui.add_enabled(self.paused, egui::Button::new("Resume").small()).clicked() {
                    self.paused = false;
                }

                ui.add_space(8.0);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.label(format!("Mean temp: {:.1}°C", self.graph.mean_temperature()));
                    ui.label(format!("Links: {}", self.graph.edges.len()));
                });
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.label(egui::RichText::new("Hot").color(egui::Color32::from_rgb(255, 64, 64)));
                ui.label(egui::RichText::new("Cold").color(egui::Color32::from_rgb(96, 96, 255)));
                ui.label("Key:");
            });

            ui.add_space(8.0);

            if !self.paused && std::time::Instant::now() - self.last_tick > REGEN_PERIOD {
                let start = std::time::Instant::now();
                self.graph = Graph::generate(
                    &mut rand::thread_rng(),
                    &CITIES,
                    &CALIFORNIA,
                    self.range,
                    self.threshold,
                    MAP_SIZE,
                    MAP_SIZE,
                );
                log::debug!(
                    "regenerated graph: {} nodes, {} links in {:.5}s",
                    self.graph.nodes.len(),
                    self.graph.edges.len(),
                    (std::time::Instant::now() - start).as_secs_f32()
                );
                self.last_tick = std::time::Instant::now();
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.draw_map(ui);

                ui.add_space(12.0);

                for paragraph in MAP_EXPLANATION {
                    ui.label(paragraph);
                    ui.add_space(6.0);
                }
            });
        });
    }

    fn draw_map(&self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(egui::Vec2::splat(MAP_SIZE), egui::Sense::hover());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, egui::Rounding::same(4.0), egui::Color32::from_rgb(24, 24, 26));

        // Edges go down first so the node discs cover their endpoints.
        for edge in &self.graph.edges {
            let a = &self.graph.nodes[edge.from];
            let b = &self.graph.nodes[edge.to];
            painter.line_segment(
                [origin + egui::vec2(a.x, a.y), origin + egui::vec2(b.x, b.y)],
                egui::Stroke::new(2.0, egui::Color32::from_gray(200)),
            );
        }

        for node in &self.graph.nodes {
            let center = origin + egui::vec2(node.x, node.y);
            let [r, g, b] = graph::temp_color(node.temp, self.graph.range);

            painter.circle_filled(center, graph::NODE_RADIUS, egui::Color32::from_rgb(r, g, b));
            painter.circle_stroke(center, graph::NODE_RADIUS, egui::Stroke::new(1.0, egui::Color32::from_gray(15)));
            painter.text(
                center - egui::vec2(0.0, graph::NODE_RADIUS + 5.0),
                egui::Align2::CENTER_BOTTOM,
                &node.label,
                egui::FontId::proportional(10.0),
                egui::Color32::from_gray(238),
            );
        }
    }
}

const OVERVIEW_INTRO: &str = "Using graph theory to visualize and analyze climate change data. \
    This animation represents climate impact over time.";

const OVERVIEW_EXPLANATION: [&str; 5] = [
    "In California, graph theory can be applied to understand climate change trends by \
        representing various climate factors as nodes and the relationships between them as \
        edges. For example:",
    "1. Nodes: Climate factors such as temperature, precipitation, air quality, and sea levels.",
    "2. Edges: The relationships between these factors, like how rising temperatures affect \
        rainfall patterns or how droughts are linked to increased wildfires.",
    "By visualizing these connections, we can detect patterns, understand the dynamics between \
        factors, and predict how certain variables might change under different conditions.",
    "Graph-based models help make complex data more understandable, allowing researchers, \
        policymakers, and the public to make better-informed decisions to combat climate change.",
];

const MAP_EXPLANATION: [&str; 2] = [
    "The temperature range and edge threshold help us simulate the changing climate in \
        California. By adjusting the temperature range, we can visualize how different cities \
        may experience varying temperatures due to climate change. The edge threshold determines \
        which cities are considered to have similar climates, based on temperature differences. \
        A lower threshold creates more precise groupings of cities, while a higher threshold \
        connects cities with broader temperature ranges, representing larger climate zones.",
    "This model uses discrete mathematics, specifically graph theory, to represent the cities \
        as nodes and their temperature similarities as edges. The edge threshold controls the \
        connectivity between cities, showing us how regions with similar climates could be \
        interconnected. The graph evolves as the temperature ranges change, illustrating the \
        shifting climate patterns across the state.",
];
