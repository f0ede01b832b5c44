use rand::Rng;

use crate::city::{self, Bounds, City};

/// Radius of a node disc, in drawing units.
pub const NODE_RADIUS: f32 = 10.0;

/// Closed interval the per-cycle temperatures are drawn from, in °C.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TempRange {
    pub min: i32,
    pub max: i32,
}

impl Default for TempRange {
    fn default() -> Self {
        Self { min: 15, max: 30 }
    }
}

impl TempRange {
    /// Uniform integer draw over the interval.
    ///
    /// The map screen pins `min` and only exposes `max`, whose slider floor
    /// sits below the pinned value, so an inverted interval is reachable; the
    /// draw collapses it to `min` rather than panicking.
    pub fn sample(&self, rng: &mut impl Rng) -> i32 {
        rng.gen_range(self.min..=self.max.max(self.min))
    }
}

/// One city for the current cycle, placed on the drawing surface.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: usize,
    pub label: String,
    pub temp: i32,
    pub x: f32,
    pub y: f32,
}

/// Undirected link between two nodes, `from < to` by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

/// One cycle's worth of simulated climate state.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Range the temperatures were drawn from, kept for the color ramp.
    pub range: TempRange,
}

impl Graph {
    /// Draws a fresh temperature per city, places each city on a
    /// `width` x `height` surface, and links the pairs whose temperatures
    /// fall within `threshold` of each other.
    ///
    /// Nodes come out in city order with `id` equal to the city's index.
    pub fn generate(
        rng: &mut impl Rng,
        cities: &[City],
        bounds: &Bounds,
        range: TempRange,
        threshold: i32,
        width: f32,
        height: f32,
    ) -> Self {
        let nodes: Vec<Node> = cities
            .iter()
            .enumerate()
            .map(|(id, c)| {
                let (x, y) = city::project(c.lat, c.lon, bounds, width, height);
                let temp = range.sample(rng);
                Node {
                    id,
                    label: format!("{} - {}°C", c.name, temp),
                    temp,
                    x,
                    y,
                }
            })
            .collect();

        let edges = connect_similar(&nodes, threshold);

        Self { nodes, edges, range }
    }

    pub fn mean_temperature(&self) -> f32 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.nodes.iter().map(|n| n.temp as f32).sum::<f32>() / self.nodes.len() as f32
    }

    /// Rasterizes the graph into a `size` x `size` RGB byte buffer.
    ///
    /// Background, then edges, then node discs in their temperature colors;
    /// labels are not rasterized. Node coordinates are expected to lie within
    /// the square (anything outside is dropped per pixel).
    pub fn as_image_raw(&self, size: usize) -> Vec<u8> {
        const BACKGROUND: [u8; 3] = [24, 24, 26];
        const EDGE_COLOR: [u8; 3] = [200, 200, 200];

        let mut data = vec![0u8; size * size * 3];
        for px in data.chunks_exact_mut(3) {
            px.copy_from_slice(&BACKGROUND);
        }

        let mut put = |x: i32, y: i32, color: [u8; 3]| {
            if x < 0 || y < 0 || x >= size as i32 || y >= size as i32 {
                return;
            }
            let i = (y as usize * size + x as usize) * 3;
            data[i..i + 3].copy_from_slice(&color);
        };

        for edge in &self.edges {
            let a = &self.nodes[edge.from];
            let b = &self.nodes[edge.to];
            let steps = ((b.x - a.x).abs().max((b.y - a.y).abs()).ceil() as usize).max(1);
            for s in 0..=steps {
                let t = s as f32 / steps as f32;
                let x = (a.x + (b.x - a.x) * t).round() as i32;
                let y = (a.y + (b.y - a.y) * t).round() as i32;
                put(x, y, EDGE_COLOR);
                put(x + 1, y, EDGE_COLOR);
                put(x, y + 1, EDGE_COLOR);
            }
        }

        let r = NODE_RADIUS as i32;
        for node in &self.nodes {
            let color = temp_color(node.temp, self.range);
            let (cx, cy) = (node.x.round() as i32, node.y.round() as i32);
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy <= r * r {
                        put(cx + dx, cy + dy, color);
                    }
                }
            }
        }

        data
    }
}

/// Links every unordered pair of nodes whose temperatures differ by strictly
/// less than `threshold`. Quadratic over the node list, which stays tiny.
pub fn connect_similar(nodes: &[Node], threshold: i32) -> Vec<Edge> {
    let mut edges = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if (nodes[i].temp - nodes[j].temp).abs() < threshold {
                edges.push(Edge { from: i, to: j });
            }
        }
    }
    edges
}

/// Blends from cold blue to hot red across the configured range.
pub fn temp_color(temp: i32, range: TempRange) -> [u8; 3] {
    const COLD: [u8; 3] = [96, 96, 255];
    const HOT: [u8; 3] = [255, 64, 64];

    let span = (range.max - range.min).max(1) as f32;
    let t = ((temp - range.min) as f32 / span).clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    [
        lerp(COLD[0], HOT[0]),
        lerp(COLD[1], HOT[1]),
        lerp(COLD[2], HOT[2]),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::city::{CALIFORNIA, CITIES};

    fn node(id: usize, temp: i32) -> Node {
        Node {
            id,
            label: format!("city {} - {}°C", id, temp),
            temp,
            x: 0.0,
            y: 0.0,
        }
    }

    fn nodes_with_temps(temps: &[i32]) -> Vec<Node> {
        temps.iter().enumerate().map(|(i, t)| node(i, *t)).collect()
    }

    #[test]
    fn edges_follow_the_threshold_rule() {
        let nodes = nodes_with_temps(&[20, 22, 30]);
        let edges = connect_similar(&nodes, 5);
        assert_eq!(edges, vec![Edge { from: 0, to: 1 }]);
    }

    #[test]
    fn zero_threshold_connects_nothing() {
        // Strict inequality: even identical temperatures stay unlinked.
        let nodes = nodes_with_temps(&[20, 20, 25]);
        assert!(connect_similar(&nodes, 0).is_empty());
        assert!(connect_similar(&nodes, -3).is_empty());
    }

    #[test]
    fn edges_are_ordered_and_unique() {
        let nodes = nodes_with_temps(&[21, 21, 21, 21]);
        let edges = connect_similar(&nodes, 1);
        assert_eq!(edges.len(), 6);
        let distinct: HashSet<Edge> = edges.iter().copied().collect();
        assert_eq!(distinct.len(), edges.len());
        for edge in &edges {
            assert!(edge.from < edge.to);
        }
    }

    #[test]
    fn growing_threshold_only_adds_edges() {
        let nodes = nodes_with_temps(&[18, 21, 25, 30, 31]);
        let mut previous: HashSet<Edge> = HashSet::new();
        for threshold in 0..=14 {
            let current: HashSet<Edge> = connect_similar(&nodes, threshold).into_iter().collect();
            assert!(
                previous.is_subset(&current),
                "threshold {} dropped an edge",
                threshold
            );
            previous = current;
        }
    }

    #[test]
    fn generate_keeps_city_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = Graph::generate(
            &mut rng,
            &CITIES,
            &CALIFORNIA,
            TempRange::default(),
            5,
            400.0,
            400.0,
        );
        assert_eq!(graph.nodes.len(), CITIES.len());
        for (i, node) in graph.nodes.iter().enumerate() {
            assert_eq!(node.id, i);
            assert!(node.label.starts_with(CITIES[i].name));
            assert_eq!(node.label, format!("{} - {}°C", CITIES[i].name, node.temp));
        }
    }

    #[test]
    fn generate_places_nodes_by_projection() {
        let mut rng = StdRng::seed_from_u64(3);
        let cities = [
            City { name: "A", lat: 32.0, lon: -124.0 },
            City { name: "B", lat: 42.0, lon: -114.0 },
        ];
        let bounds = Bounds { lat_min: 32.0, lat_max: 42.0, lon_min: -124.0, lon_max: -114.0 };
        let graph = Graph::generate(&mut rng, &cities, &bounds, TempRange::default(), 5, 100.0, 100.0);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!((graph.nodes[0].x, graph.nodes[0].y), (0.0, 100.0));
        assert_eq!((graph.nodes[1].x, graph.nodes[1].y), (100.0, 0.0));
    }

    #[test]
    fn samples_stay_within_the_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let range = TempRange { min: 15, max: 30 };
        for _ in 0..200 {
            let t = range.sample(&mut rng);
            assert!((15..=30).contains(&t));
        }
    }

    #[test]
    fn inverted_range_collapses_to_min() {
        let mut rng = StdRng::seed_from_u64(13);
        let range = TempRange { min: 15, max: 10 };
        for _ in 0..20 {
            assert_eq!(range.sample(&mut rng), 15);
        }
    }

    #[test]
    fn oversized_threshold_yields_a_complete_graph() {
        let mut rng = StdRng::seed_from_u64(17);
        let range = TempRange { min: 20, max: 24 };
        for _ in 0..20 {
            let graph = Graph::generate(&mut rng, &CITIES, &CALIFORNIA, range, 10, 400.0, 400.0);
            // Span of 4 is always under the threshold, so every pair links.
            assert_eq!(graph.edges.len(), 10);
        }
    }

    #[test]
    fn export_covers_the_full_square() {
        let graph = Graph {
            nodes: vec![Node {
                id: 0,
                label: "somewhere - 20°C".into(),
                temp: 20,
                x: 200.0,
                y: 200.0,
            }],
            edges: Vec::new(),
            range: TempRange { min: 15, max: 30 },
        };
        let data = graph.as_image_raw(400);
        assert_eq!(data.len(), 400 * 400 * 3);
        let center = (200 * 400 + 200) * 3;
        let expected = temp_color(20, graph.range);
        assert_eq!(&data[center..center + 3], &expected);
    }
}
