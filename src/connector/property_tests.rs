use proptest::prelude::*;

use super::*;
use crate::scene::SceneView;

const EPS: f32 = 1e-3;

fn arb_edge() -> impl Strategy<Value = Edge> {
    prop_oneof![
        Just(Edge::Left),
        Just(Edge::Top),
        Just(Edge::Right),
        Just(Edge::Bottom),
    ]
}

fn arb_box() -> impl Strategy<Value = NodeBox> {
    (-400i32..400, -400i32..400, 0i32..200, 0i32..200)
        .prop_map(|(x, y, w, h)| NodeBox::new(x as f32, y as f32, w as f32, h as f32))
}

/// Where the pointer goes: anywhere, or close to one edge of another node.
#[derive(Debug, Clone)]
enum Pointer {
    Free(i32, i32),
    Near {
        node: usize,
        edge: Edge,
        along: u8,
        jitter: i8,
    },
}

fn arb_pointer() -> impl Strategy<Value = Pointer> {
    prop_oneof![
        (-600i32..600, -600i32..600).prop_map(|(x, y)| Pointer::Free(x, y)),
        (0usize..4, arb_edge(), any::<u8>(), -15i8..15).prop_map(|(node, edge, along, jitter)| {
            Pointer::Near {
                node,
                edge,
                along,
                jitter,
            }
        }),
    ]
}

#[derive(Debug, Clone)]
struct Case {
    nodes: Vec<DiagramNode>,
    request: ConnectorRequest,
}

/// Point on `edge` of `b`, `along` of the way across (in 1/255 steps, rounded).
fn edge_point(b: &NodeBox, edge: Edge, along: u8) -> Coordinate {
    let frac = f32::from(along) / 255.0;
    let x = (b.left() + b.width * frac).round();
    let y = (b.top() + b.height * frac).round();
    match edge {
        Edge::Left => Coordinate::new(b.left(), y),
        Edge::Right => Coordinate::new(b.right(), y),
        Edge::Top => Coordinate::new(x, b.top()),
        Edge::Bottom => Coordinate::new(x, b.bottom()),
    }
}

fn arb_case() -> impl Strategy<Value = Case> {
    (
        arb_box(),
        prop::collection::vec(arb_box(), 0..4),
        arb_edge(),
        any::<u8>(),
        arb_pointer(),
    )
        .prop_map(|(source, others, from_position, along, pointer)| {
            let mut nodes = vec![DiagramNode::new("src", source)];
            nodes.extend(
                others
                    .iter()
                    .enumerate()
                    .map(|(i, b)| DiagramNode::new(format!("n{i}"), *b)),
            );
            let start = edge_point(&source, from_position, along);
            let end = match pointer {
                Pointer::Near {
                    node,
                    edge,
                    along,
                    jitter,
                } if !others.is_empty() => {
                    let target = &others[node % others.len()];
                    let p = edge_point(target, edge, along);
                    let (dx, dy) = edge.unit();
                    p.offset(dx * f32::from(jitter), dy * f32::from(jitter))
                }
                Pointer::Near { along, .. } => edge_point(&source, from_position, along),
                Pointer::Free(x, y) => Coordinate::new(x as f32, y as f32),
            };
            Case {
                request: ConnectorRequest {
                    start_point: start,
                    end_point: end,
                    line_config: LineConfig::default(),
                    from_node: nodes[0].clone(),
                    from_position,
                },
                nodes,
            }
        })
}

fn route(case: &Case) -> DrawInfo {
    let scene = SceneView {
        nodes: &case.nodes,
        zoom: 1.0,
        is_area_selecting: false,
    };
    let mut info = DrawInfo::default();
    allocate(&mut info, &case.request, &scene);
    info
}

fn global_points(info: &DrawInfo) -> Vec<Coordinate> {
    info.line_info
        .broken_line_points
        .iter()
        .map(|&p| info.to_global(p))
        .collect()
}

/// Closed boxes with space between them.
fn separated(a: &NodeBox, b: &NodeBox) -> bool {
    a.right() < b.left() || b.right() < a.left() || a.bottom() < b.top() || b.bottom() < a.top()
}

/// Whether the axis-aligned segment `a`-`b` enters the open interior of `n`.
/// Running along an edge or ending on one does not count.
fn enters_interior(a: Coordinate, b: Coordinate, n: &NodeBox) -> bool {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    x0 < n.right() && x1 > n.left() && y0 < n.bottom() && y1 > n.top()
}

proptest! {
    #[test]
    fn segments_are_axis_aligned(case in arb_case()) {
        let info = route(&case);
        for pair in info.line_info.broken_line_points.windows(2) {
            let same_x = pair[0].x == pair[1].x;
            let same_y = pair[0].y == pair[1].y;
            prop_assert!(same_x != same_y, "diagonal or empty segment {:?}", pair);
        }
    }

    #[test]
    fn frame_contains_line_and_arrow_with_padding(case in arb_case()) {
        let info = route(&case);
        let padding = case.request.line_config.padding;
        prop_assert!(info.width >= 0.0 && info.height >= 0.0);

        let arrow = &info.line_info.arrow_info;
        let points = info
            .line_info
            .broken_line_points
            .iter()
            .chain([&arrow.p1, &arrow.p2, &arrow.p3]);
        for p in points {
            prop_assert!(p.x >= padding - EPS && p.x <= info.width - padding + EPS, "{:?}", p);
            prop_assert!(p.y >= padding - EPS && p.y <= info.height - padding + EPS, "{:?}", p);
        }
    }

    #[test]
    fn connection_fields_agree(case in arb_case()) {
        let info = route(&case);
        prop_assert_eq!(info.connected_position.is_some(), info.is_connected_node);
        prop_assert_eq!(info.connected_node_id.is_some(), info.is_connected_node);

        if let (Some(id), Some(position)) = (&info.connected_node_id, info.connected_position) {
            let target = case.nodes.iter().find(|n| &n.id == id).map(|n| n.style_info);
            prop_assert!(target.is_some());
            let area = node_sticky_area(&target.unwrap_or_default(), case.request.start_point);
            let sticky = line_sticky_position(
                case.request.end_point,
                &area,
                case.request.line_config.sticky_tolerance,
            );
            prop_assert_eq!(sticky.map(contrary_position), Some(position));

            // last leg travels into the matched edge
            let points = &info.line_info.broken_line_points;
            prop_assert!(points.len() >= 2);
            let a = points[points.len() - 2];
            let b = points[points.len() - 1];
            let (dx, dy) = position.contrary().unit();
            prop_assert!((b.x - a.x) * dx + (b.y - a.y) * dy > 0.0);
        }
    }

    #[test]
    fn every_vertex_is_a_turn(case in arb_case()) {
        let info = route(&case);
        for w in info.line_info.broken_line_points.windows(3) {
            let first_horizontal = w[0].y == w[1].y;
            let second_horizontal = w[1].y == w[2].y;
            // same axis twice is either a straight-through vertex or a fold-back
            prop_assert!(first_horizontal != second_horizontal, "no turn at {:?}", w);
        }
    }

    #[test]
    fn snapped_routes_stay_out_of_both_nodes(case in arb_case()) {
        let info = route(&case);
        let Some(id) = info.connected_node_id.as_ref() else {
            return Ok(());
        };
        let source = case.nodes[0].style_info;
        let target = case.nodes.iter().find(|n| &n.id == id).map(|n| n.style_info);
        prop_assert!(target.is_some());
        let target = target.unwrap_or_default();
        if !separated(&source, &target) {
            return Ok(());
        }

        let points = global_points(&info);
        for pair in points.windows(2) {
            prop_assert!(!enters_interior(pair[0], pair[1], &source), "through source: {:?}", pair);
            prop_assert!(!enters_interior(pair[0], pair[1], &target), "through target: {:?}", pair);
        }
    }

    #[test]
    fn source_alone_never_connects(case in arb_case()) {
        let alone = Case {
            nodes: case.nodes[..1].to_vec(),
            request: case.request.clone(),
        };
        let info = route(&alone);
        prop_assert!(!info.is_connected_node);
    }

    #[test]
    fn routing_is_idempotent(case in arb_case()) {
        let first = route(&case);
        let again = route(&case);
        prop_assert_eq!(&first, &again);

        let scene = SceneView {
            nodes: &case.nodes,
            zoom: 1.0,
            is_area_selecting: false,
        };
        let mut reused = first.clone();
        allocate(&mut reused, &case.request, &scene);
        prop_assert_eq!(&first, &reused);
    }
}
