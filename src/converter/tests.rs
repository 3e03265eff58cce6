use crate::circuit::elements::{CutoutShape, HoleShape, PlatedHoleShape, SmtpadShape};
use crate::circuit::{CircuitElement, CircuitJson};
use crate::converter::convert_kicad_json_to_circuit_json;
use crate::converter::errors::ConverterError;
use crate::converter::style::{ConverterOptions, ResolvedPcbStyle};
use crate::kicad::model::footprint_library::FootprintDocument;
use crate::kicad::model::layer::LayerRef;
use crate::kicad::model::symbol_library::SymbolDocument;
use serde_json::{json, Value};

const EPSILON: f64 = 1e-6;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn footprint(extra: Value) -> FootprintDocument {
    let mut base = json!({ "footprint_name": "TEST", "layer": "F.Cu" });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        base.extend(extra.clone());
    }
    serde_json::from_value(base).unwrap()
}

async fn convert(document: &FootprintDocument) -> CircuitJson {
    convert_kicad_json_to_circuit_json(document, None, &ConverterOptions::default()).await.unwrap()
}

fn count(result: &CircuitJson, type_name: &str) -> usize {
    result.elements_of(type_name).count()
}

fn stroke(width: f64) -> Value {
    json!({ "width": width, "type": "solid" })
}

#[tokio::test]
async fn scenario_single_smd_pad() {
    let document = footprint(json!({
        "pads": [{
            "name": "1", "pad_type": "smd", "pad_shape": "rect",
            "at": { "x": 0.0, "y": 0.0 }, "size": { "x": 1.0, "y": 1.0 },
            "layers": ["F.Cu", "F.Paste", "F.Mask"]
        }]
    }));
    let result = convert(&document).await;

    let pads: Vec<_> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbSmtpad(pad) => Some(pad),
        _ => None,
    }).collect();
    assert_eq!(pads.len(), 1);
    assert_eq!(pads[0].layer, LayerRef::Top);
    assert_eq!(pads[0].port_hints, vec!["1".to_string()]);
    assert_eq!(pads[0].pcb_port_id.as_deref(), Some("pcb_port_0"));
    assert_eq!(pads[0].shape, SmtpadShape::Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0, rect_border_radius: None });

    assert_eq!(count(&result, "source_port"), 1);
    assert_eq!(count(&result, "pcb_port"), 1);

    let Some(CircuitElement::PcbComponent(component)) = result.elements_of("pcb_component").next() else {
        panic!("missing pcb_component");
    };
    assert!(approx(component.width, 1.0));
    assert!(approx(component.height, 1.0));
}

#[tokio::test]
async fn zero_coordinates_serialize_without_sign() {
    let document = footprint(json!({
        "pads": [
            { "name": "1", "pad_type": "smd", "pad_shape": "rect", "at": { "x": 0.0, "y": 0.0 },
              "size": { "x": 1.0, "y": 1.0 }, "layers": ["F.Cu"] },
            { "name": "2", "pad_type": "thru_hole", "pad_shape": "rect", "at": { "x": 2.0, "y": 0.0 },
              "size": { "x": 1.5, "y": 1.5 }, "drill": { "width": 0.8 }, "layers": ["*.Cu"] }
        ],
        "fp_lines": [{ "start": { "x": -1.0, "y": 0.0 }, "end": { "x": 1.0, "y": 0.0 }, "layer": "F.SilkS", "stroke": stroke(0.1) }]
    }));
    let json = convert(&document).await.to_json(false).unwrap();

    assert!(!json.contains("-0.0"), "{json}");
    assert!(json.contains(r#""shape":"rect","x":0.0,"y":0.0,"width":1.0"#));
    assert!(json.contains(r#""hole_offset_y":0.0"#));
}

#[tokio::test]
async fn component_size_covers_copper_pads_only() {
    let document = footprint(json!({
        "pads": [
            { "name": "1", "pad_type": "smd", "pad_shape": "rect", "at": { "x": 0.0, "y": 0.0, "angle": 90.0 },
              "size": { "x": 1.0, "y": 2.0 }, "layers": ["F.Cu"] },
            { "name": "2", "pad_type": "thru_hole", "pad_shape": "circle", "at": { "x": 3.0, "y": 0.0 },
              "size": { "x": 1.5, "y": 1.5 }, "drill": { "width": 0.8 }, "layers": ["*.Cu"] },
            { "pad_type": "np_thru_hole", "pad_shape": "circle", "at": { "x": 10.0, "y": 10.0 },
              "size": { "x": 3.0, "y": 3.0 }, "drill": { "width": 3.0 }, "layers": ["*.Cu", "*.Mask"] },
            { "name": "3", "pad_type": "connect", "pad_shape": "circle", "at": { "x": -10.0, "y": 0.0 },
              "size": { "x": 1.0, "y": 1.0 }, "layers": ["F.Mask"] },
            { "pad_type": "smd", "pad_shape": "rect", "at": { "x": -5.0, "y": 0.0 },
              "size": { "x": 1.0, "y": 1.0 }, "layers": ["F.Paste"] }
        ]
    }));
    let result = convert(&document).await;

    let Some(CircuitElement::PcbComponent(component)) = result.elements_of("pcb_component").next() else {
        panic!("missing pcb_component");
    };
    // Rotated pad spans x -1..1, round pad spans x 2.25..3.75 and y -0.75..0.75
    assert!(approx(component.width, 4.75));
    assert!(approx(component.height, 1.5));
}

#[tokio::test]
async fn paste_and_mask_only_pads_are_skipped() {
    let pad = |name: &str, x: f64, layers: Value| json!({
        "name": name, "pad_type": "smd", "pad_shape": "roundrect", "at": { "x": x, "y": 0.0 },
        "size": { "x": 0.2, "y": 0.2 }, "layers": layers, "roundrect_rratio": 0.25
    });
    let document = footprint(json!({
        "pads": [
            pad("1", -0.2, json!(["F.Cu", "F.Mask"])),
            pad("2", 0.2, json!(["F.Cu", "F.Mask"])),
            pad("", -0.2, json!(["F.Paste"])),
            pad("", 0.2, json!(["F.Mask"]))
        ]
    }));
    let result = convert(&document).await;

    assert_eq!(count(&result, "pcb_smtpad"), 2);
    assert_eq!(count(&result, "source_port"), 2);
    assert_eq!(result.diagnostics.len(), 2);
    assert!(result.diagnostics.iter().all(|d| d.element == "pad"));
    assert_eq!(result.diagnostics[0].layer.as_deref(), Some("F.Paste"));
}

#[tokio::test]
async fn scenario_circular_plated_hole() {
    let document = footprint(json!({
        "pads": [{
            "name": "1", "pad_type": "thru_hole", "pad_shape": "circle",
            "at": { "x": 0.0, "y": 0.0, "angle": 0.0 }, "size": { "x": 1.2, "y": 1.2 },
            "drill": { "width": 0.75 }, "layers": ["*.Cu", "*.Mask"]
        }]
    }));
    let result = convert(&document).await;

    let holes: Vec<_> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbPlatedHole(hole) => Some(hole),
        _ => None,
    }).collect();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].shape, PlatedHoleShape::Circle { x: 0.0, y: 0.0, outer_diameter: 1.2, hole_diameter: 0.75 });
    assert_eq!(holes[0].layers, vec![LayerRef::Top, LayerRef::Bottom]);

    let value = serde_json::to_value(&result.elements).unwrap();
    let hole = value.as_array().unwrap().iter().find(|v| v["type"] == "pcb_plated_hole").unwrap();
    assert_eq!(hole["shape"], "circle");
}

#[tokio::test]
async fn scenario_square_board_cutout() {
    let edge = |x1: f64, y1: f64, x2: f64, y2: f64| json!({
        "start": { "x": x1, "y": y1 }, "end": { "x": x2, "y": y2 }, "layer": "Edge.Cuts", "stroke": stroke(0.05)
    });
    let document = footprint(json!({
        "fp_lines": [
            edge(0.0, 0.0, 1.0, 0.0),
            edge(1.0, 0.0, 1.0, 1.0),
            edge(1.0, 1.0, 0.0, 1.0),
            edge(0.0, 1.0, 0.0, 0.0),
        ]
    }));
    let result = convert(&document).await;

    let cutouts: Vec<_> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbCutout(cutout) => Some(cutout),
        _ => None,
    }).collect();
    assert_eq!(cutouts.len(), 1);
    let CutoutShape::Polygon { points } = &cutouts[0].shape else {
        panic!("expected polygon cutout");
    };
    assert_eq!(points.len(), 4);
    assert!(approx(points[2].x, 1.0) && approx(points[2].y, -1.0));

    // Edge lines are not drawn a second time
    assert_eq!(count(&result, "pcb_silkscreen_path"), 0);
    assert_eq!(count(&result, "pcb_trace"), 0);
    assert!(result.diagnostics.is_empty());
}

#[tokio::test]
async fn scenario_thick_silkscreen_line_becomes_pill() {
    let document = footprint(json!({
        "fp_lines": [{
            "start": { "x": -2.0, "y": 1.0 }, "end": { "x": 2.0, "y": 1.0 },
            "layer": "F.SilkS", "stroke": stroke(0.4)
        }]
    }));
    let result = convert(&document).await;

    let Some(CircuitElement::PcbSilkscreenPill(pill)) = result.elements_of("pcb_silkscreen_pill").next() else {
        panic!("missing pill");
    };
    assert!(approx(pill.center.x, 0.0));
    assert!(approx(pill.center.y, -1.0));
    assert!(approx(pill.width, 4.4));
    assert!(approx(pill.height, 0.4));
    assert!(approx(pill.rotation, 0.0));
    assert_eq!(pill.layer, LayerRef::Top);
}

fn text_document() -> FootprintDocument {
    footprint(json!({
        "fp_texts": [
            { "fp_text_type": "reference", "text": "REF**", "at": { "x": 0.0, "y": -1.17 }, "layer": "F.SilkS",
              "effects": { "font": { "size": { "x": 1.0, "y": 1.0 }, "thickness": 0.15 } } },
            { "fp_text_type": "user", "text": "BACK", "at": { "x": 0.0, "y": 2.0 }, "layer": "B.SilkS",
              "effects": { "font": { "size": { "x": 0.8, "y": 0.8 } } } },
            { "fp_text_type": "value", "text": "TEST_VALUE", "at": { "x": 0.0, "y": 1.17 }, "layer": "F.Fab",
              "effects": { "font": { "size": { "x": 0.8, "y": 0.8 } } } }
        ]
    }))
}

fn silkscreen_texts(result: &CircuitJson) -> Vec<(LayerRef, f64)> {
    result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbSilkscreenText(text) => Some((text.layer, text.font_size)),
        _ => None,
    }).collect()
}

fn fabrication_text_sizes(result: &CircuitJson) -> Vec<f64> {
    result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbFabricationNoteText(text) => Some(text.font_size),
        _ => None,
    }).collect()
}

#[tokio::test]
async fn scenario_texts_keep_document_sizes() {
    let result = convert(&text_document()).await;

    assert_eq!(silkscreen_texts(&result), vec![(LayerRef::Top, 1.0), (LayerRef::Bottom, 0.8)]);
    assert_eq!(fabrication_text_sizes(&result), vec![0.8]);
}

#[tokio::test]
async fn scenario_style_override_applies_to_silkscreen_only() {
    let options = ConverterOptions::with_style(ResolvedPcbStyle { silkscreen_font_size: Some(2.5) });
    let result = convert_kicad_json_to_circuit_json(&text_document(), None, &options).await.unwrap();

    assert_eq!(silkscreen_texts(&result), vec![(LayerRef::Top, 2.5), (LayerRef::Bottom, 2.5)]);
    assert_eq!(fabrication_text_sizes(&result), vec![0.8]);
}

#[tokio::test]
async fn rotated_rect_pads_swap_dimensions() {
    let document = footprint(json!({
        "pads": [
            { "name": "1", "pad_type": "smd", "pad_shape": "rect", "at": { "x": 0.0, "y": 0.0, "angle": 90.0 },
              "size": { "x": 1.0, "y": 2.0 }, "layers": ["F.Cu"] },
            { "name": "2", "pad_type": "thru_hole", "pad_shape": "rect", "at": { "x": 3.0, "y": 1.0, "angle": 270.0 },
              "size": { "x": 1.5, "y": 2.5 }, "drill": { "width": 0.8, "offset": { "x": 0.3, "y": 0.0 } },
              "layers": ["*.Cu"] },
            { "name": "3", "pad_type": "smd", "pad_shape": "rect", "at": { "x": 0.0, "y": 4.0, "angle": 180.0 },
              "size": { "x": 1.0, "y": 2.0 }, "layers": ["F.Cu"] }
        ]
    }));
    let result = convert(&document).await;

    let mut smd_sizes = vec![];
    for element in &result.elements {
        match element {
            CircuitElement::PcbSmtpad(pad) => {
                if let SmtpadShape::Rect { width, height, .. } = pad.shape {
                    smd_sizes.push((width, height));
                }
            }
            CircuitElement::PcbPlatedHole(hole) => {
                let PlatedHoleShape::CircularHoleWithRectPad { x, y, rect_pad_width, rect_pad_height, hole_offset_x, hole_offset_y, .. } = hole.shape else {
                    panic!("expected rect pad plated hole");
                };
                assert_eq!((x, y), (3.0, -1.0));
                assert_eq!((rect_pad_width, rect_pad_height), (2.5, 1.5));
                // Offset (0.3, 0) turned by 270° points along -y in the footprint frame
                assert!(approx(hole_offset_x, 0.0));
                assert!(approx(hole_offset_y, 0.3));
            }
            _ => {}
        }
    }
    assert_eq!(smd_sizes, vec![(2.0, 1.0), (1.0, 2.0)]);
}

#[tokio::test]
async fn shared_names_give_one_port() {
    let pad = |name: &str, x: f64| json!({
        "name": name, "pad_type": "smd", "pad_shape": "rect", "at": { "x": x, "y": 0.0 },
        "size": { "x": 1.0, "y": 1.0 }, "layers": ["F.Cu"]
    });
    let document = footprint(json!({
        "pads": [pad("1", 0.0), pad("1", 2.0), pad("", 4.0), pad("2", 6.0)]
    }));
    let result = convert(&document).await;

    assert_eq!(count(&result, "source_port"), 2);
    assert_eq!(count(&result, "schematic_port"), 2);
    assert_eq!(count(&result, "pcb_port"), 2);
    assert_eq!(count(&result, "pcb_smtpad"), 4);

    let unnamed = result.elements.iter().find_map(|e| match e {
        CircuitElement::PcbSmtpad(pad) if pad.port_hints.is_empty() => Some(pad),
        _ => None,
    }).unwrap();
    assert_eq!(unnamed.pcb_port_id, None);

    // Placement comes from the first pad bearing the name
    let Some(CircuitElement::PcbPort(port)) = result.elements_of("pcb_port").next() else {
        panic!("missing pcb_port");
    };
    assert_eq!(port.x, 0.0);

    let ids: Vec<String> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::SchematicPort(port) => Some(port.schematic_port_id.clone()),
        _ => None,
    }).collect();
    assert_eq!(ids, vec!["schematic_port_0", "schematic_port_1"]);
}

#[tokio::test]
async fn port_placement_prefers_pads_over_holes() {
    let document = footprint(json!({
        "pads": [{ "name": "A", "pad_type": "smd", "pad_shape": "rect", "at": { "x": 1.0, "y": 2.0 },
                   "size": { "x": 1.0, "y": 1.0 }, "layers": ["B.Cu"] }],
        "holes": [{ "name": "A", "pad_type": "thru_hole", "pad_shape": "circle", "at": { "x": 9.0, "y": 9.0 },
                    "drill": { "width": 1.0 }, "layers": ["*.Cu"] }]
    }));
    let result = convert(&document).await;

    let Some(CircuitElement::PcbPort(port)) = result.elements_of("pcb_port").next() else {
        panic!("missing pcb_port");
    };
    assert_eq!((port.x, port.y), (1.0, -2.0));
    assert_eq!(port.layers, vec![LayerRef::Bottom]);
    assert_eq!(count(&result, "source_port"), 1);
}

#[tokio::test]
async fn missing_drill_is_a_hard_error() {
    let document = footprint(json!({
        "pads": [{ "name": "1", "pad_type": "thru_hole", "pad_shape": "circle", "at": { "x": 0.0, "y": 0.0 },
                   "size": { "x": 1.0, "y": 1.0 }, "layers": ["*.Cu"] }]
    }));
    let result = convert_kicad_json_to_circuit_json(&document, None, &ConverterOptions::default()).await;

    assert!(matches!(result, Err(ConverterError::MissingDrill { ref name, .. }) if name == "1"));
}

#[tokio::test]
async fn unrecognized_layers_are_dropped_with_diagnostic() {
    let document = footprint(json!({
        "fp_lines": [
            { "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 1.0, "y": 0.0 }, "layer": "F.Adhes", "stroke": stroke(0.1) },
            { "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 1.0, "y": 0.0 }, "layer": "F.Fab", "stroke": stroke(0.1) }
        ]
    }));
    let result = convert(&document).await;

    assert_eq!(count(&result, "pcb_fabrication_note_path"), 1);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].layer.as_deref(), Some("F.Adhes"));
}

#[tokio::test]
async fn silkscreen_dot_and_strokeless_line() {
    let document = footprint(json!({
        "fp_lines": [
            { "start": { "x": 1.0, "y": 1.0 }, "end": { "x": 1.0, "y": 1.0 }, "layer": "F.SilkS", "stroke": stroke(0.2) },
            { "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 1.0, "y": 1.0 }, "layer": "B.SilkS", "stroke": stroke(0.0) }
        ]
    }));
    let result = convert(&document).await;

    let Some(CircuitElement::PcbSilkscreenCircle(dot)) = result.elements_of("pcb_silkscreen_circle").next() else {
        panic!("missing dot");
    };
    assert!(approx(dot.radius, 0.1));
    assert_eq!((dot.center.x, dot.center.y), (1.0, -1.0));

    let Some(CircuitElement::PcbSilkscreenPath(path)) = result.elements_of("pcb_silkscreen_path").next() else {
        panic!("missing path");
    };
    assert_eq!(path.layer, LayerRef::Bottom);
    assert_eq!(path.route.len(), 2);
}

#[tokio::test]
async fn copper_rectangle_polygon_becomes_pad() {
    let xy = |x: f64, y: f64| json!({ "type": "xy", "x": x, "y": y });
    let document = footprint(json!({
        "fp_polys": [
            { "pts": [xy(0.0, 0.0), xy(2.0, 0.0), xy(2.0, 1.0), xy(0.0, 1.0)], "layer": "F.Cu", "stroke": stroke(0.0) },
            { "pts": [xy(0.0, 0.0), xy(2.0, 0.0), xy(1.0, 1.0)], "layer": "B.Cu", "stroke": stroke(0.1) }
        ]
    }));
    let result = convert(&document).await;

    let Some(CircuitElement::PcbSmtpad(pad)) = result.elements_of("pcb_smtpad").next() else {
        panic!("missing pad");
    };
    assert_eq!(pad.shape, SmtpadShape::Rect { x: 1.0, y: -0.5, width: 2.0, height: 1.0, rect_border_radius: None });
    assert!(pad.port_hints.is_empty());

    let Some(CircuitElement::PcbTrace(trace)) = result.elements_of("pcb_trace").next() else {
        panic!("missing trace");
    };
    assert_eq!(trace.layer, LayerRef::Bottom);
    assert_eq!(trace.route.len(), 3);
    assert_eq!(trace.thickness, Some(0.1));
}

#[tokio::test]
async fn standalone_holes_respect_copper_check() {
    let document = footprint(json!({
        "holes": [
            { "name": "MH", "pad_type": "thru_hole", "pad_shape": "circle", "at": { "x": 1.0, "y": 1.0 },
              "size": { "x": 3.0, "y": 3.0 }, "drill": { "width": 2.0 }, "layers": ["F.Mask", "B.Mask"] },
            { "name": "2", "pad_type": "thru_hole", "pad_shape": "roundrect", "at": { "x": 0.0, "y": 0.0, "angle": 90.0 },
              "size": { "x": 2.0, "y": 1.0 }, "drill": { "width": 0.6 }, "layers": ["*.Cu"], "roundrect_rratio": 0.25 },
            { "name": "3", "pad_type": "thru_hole", "pad_shape": "oval", "at": { "x": 5.0, "y": 0.0, "angle": 90.0 },
              "size": { "x": 1.0, "y": 2.0 }, "drill": { "oval": true, "width": 0.6, "height": 1.2 }, "layers": ["*.Cu"] }
        ]
    }));
    let result = convert(&document).await;

    let Some(CircuitElement::PcbHole(mechanical)) = result.elements_of("pcb_hole").next() else {
        panic!("missing mechanical hole");
    };
    assert_eq!(mechanical.shape, HoleShape::Circle { x: 1.0, y: -1.0, hole_diameter: 3.0 });

    let plated: Vec<_> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbPlatedHole(hole) => Some(&hole.shape),
        _ => None,
    }).collect();
    assert_eq!(plated.len(), 2);

    let PlatedHoleShape::CircularHoleWithRectPad { rect_pad_width, rect_pad_height, rect_border_radius, .. } = plated[0] else {
        panic!("expected rect pad");
    };
    assert_eq!((*rect_pad_width, *rect_pad_height), (1.0, 2.0));
    assert_eq!(*rect_border_radius, Some(0.125));

    let PlatedHoleShape::Pill { outer_width, outer_height, hole_width, hole_height, .. } = plated[1] else {
        panic!("expected pill");
    };
    assert_eq!((*outer_width, *outer_height), (2.0, 1.0));
    assert_eq!((*hole_width, *hole_height), (1.2, 0.6));
}

#[tokio::test]
async fn oval_non_plated_hole_becomes_pill() {
    let document = footprint(json!({
        "pads": [{ "pad_type": "np_thru_hole", "pad_shape": "oval", "at": { "x": 0.0, "y": 0.0 },
                   "size": { "x": 1.0, "y": 2.0 }, "drill": { "oval": true, "width": 1.0, "height": 2.0 } }]
    }));
    let result = convert(&document).await;

    let Some(CircuitElement::PcbHole(hole)) = result.elements_of("pcb_hole").next() else {
        panic!("missing hole");
    };
    assert_eq!(hole.shape, HoleShape::Pill { x: 0.0, y: 0.0, hole_width: 1.0, hole_height: 2.0 });
    assert_eq!(count(&result, "source_port"), 0);
}

#[tokio::test]
async fn connect_pads_emit_only_a_port() {
    let document = footprint(json!({
        "pads": [{ "name": "1", "pad_type": "connect", "pad_shape": "circle", "at": { "x": 0.0, "y": 0.0 },
                   "size": { "x": 1.0, "y": 1.0 }, "layers": ["F.Mask"] }]
    }));
    let result = convert(&document).await;

    assert_eq!(count(&result, "source_port"), 1);
    assert_eq!(count(&result, "pcb_smtpad"), 0);
    assert_eq!(count(&result, "pcb_plated_hole"), 0);
    assert_eq!(result.diagnostics.len(), 1);
}

#[tokio::test]
async fn open_board_outline_reports_each_segment() {
    let document = footprint(json!({
        "fp_lines": [
            { "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 1.0, "y": 0.0 }, "layer": "Edge.Cuts", "stroke": stroke(0.05) },
            { "start": { "x": 1.0, "y": 0.0 }, "end": { "x": 1.0, "y": 1.0 }, "layer": "Edge.Cuts", "stroke": stroke(0.05) }
        ]
    }));
    let result = convert(&document).await;

    assert_eq!(count(&result, "pcb_cutout"), 0);
    assert_eq!(result.diagnostics.len(), 2);
    assert!(result.diagnostics.iter().all(|d| d.element == "edge_cut"));
}

#[tokio::test]
async fn edge_arcs_close_round_outline() {
    let document = footprint(json!({
        "fp_lines": [
            { "start": { "x": -1.0, "y": 0.0 }, "end": { "x": 1.0, "y": 0.0 }, "layer": "Edge.Cuts", "stroke": stroke(0.05) }
        ],
        "fp_arcs": [
            { "start": { "x": -1.0, "y": 0.0 }, "mid": { "x": 0.0, "y": 1.0 }, "end": { "x": 1.0, "y": 0.0 },
              "layer": "Edge.Cuts", "stroke": stroke(0.05) }
        ],
        "fp_circles": [
            { "center": { "x": 5.0, "y": 5.0 }, "end": { "x": 6.0, "y": 5.0 }, "layer": "Edge.Cuts", "stroke": stroke(0.05) }
        ]
    }));
    let result = convert(&document).await;

    let shapes: Vec<_> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbCutout(cutout) => Some(&cutout.shape),
        _ => None,
    }).collect();
    assert_eq!(shapes.len(), 2);
    let CutoutShape::Polygon { points } = shapes[0] else {
        panic!("expected polygon");
    };
    assert_eq!(points.len(), 5);
    // Arc bulges towards +y in the footprint, -y in the output
    assert!(points.iter().all(|p| p.y <= 1e-9));
    assert!(matches!(shapes[1], CutoutShape::Circle { radius, .. } if approx(*radius, 1.0)));
    assert_eq!(count(&result, "pcb_silkscreen_path"), 0);
}

#[tokio::test]
async fn courtyard_folds_into_one_rect_per_side() {
    let line = |x1: f64, y1: f64, x2: f64, y2: f64, layer: &str| json!({
        "start": { "x": x1, "y": y1 }, "end": { "x": x2, "y": y2 }, "layer": layer, "stroke": stroke(0.05)
    });
    let document = footprint(json!({
        "fp_lines": [
            line(-2.0, -1.0, 2.0, -1.0, "F.CrtYd"),
            line(2.0, -1.0, 2.0, 1.5, "F.CrtYd"),
            line(-1.0, 0.0, 1.0, 0.0, "B.Courtyard")
        ]
    }));
    let result = convert(&document).await;

    let rects: Vec<_> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbCourtyardRect(rect) => Some(rect),
        _ => None,
    }).collect();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].layer, LayerRef::Top);
    assert!(approx(rects[0].width, 4.0));
    assert!(approx(rects[0].height, 2.5));
    assert!(approx(rects[0].center.y, -0.25));
    assert_eq!(rects[0].stroke_width, Some(0.05));
    assert_eq!(rects[1].layer, LayerRef::Bottom);
}

#[tokio::test]
async fn properties_become_text_unless_hidden() {
    let document = footprint(json!({
        "properties": [
            { "key": "Reference", "val": "U1", "at": { "x": 0.0, "y": -2.0, "angle": 90.0 }, "layer": "F.SilkS" },
            { "key": "Value", "val": "NE555", "at": { "x": 0.0, "y": 2.0 }, "layer": "F.Fab", "hide": true },
            { "key": "Datasheet", "val": "x.pdf", "at": { "x": 0.0, "y": 0.0 } }
        ]
    }));
    let result = convert(&document).await;

    let texts: Vec<_> = result.elements.iter().filter_map(|e| match e {
        CircuitElement::PcbSilkscreenText(text) => Some(text),
        _ => None,
    }).collect();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, "U1");
    assert_eq!(texts[0].ccw_rotation, 90.0);
    assert_eq!((texts[0].anchor_position.x, texts[0].anchor_position.y), (0.0, 2.0));
    assert_eq!(texts[0].font_size, 1.27);
    assert_eq!(count(&result, "pcb_fabrication_note_text"), 0);
}

#[tokio::test]
async fn symbol_hints_land_on_schematic_component() {
    let document = footprint(json!({}));
    let symbol: SymbolDocument = serde_json::from_value(json!({ "symbols": [{
        "name": "R",
        "properties": [{ "key": "Value", "value": "10k" }],
        "pins": [
            { "name": "~", "number": "1", "at": { "x": 0.0, "y": 3.81, "angle": 270.0 } },
            { "name": "~", "number": "2", "at": { "x": 0.0, "y": -3.81, "angle": 90.0 } }
        ]
    }] })).unwrap();
    let result = convert_kicad_json_to_circuit_json(&document, Some(&symbol), &ConverterOptions::default()).await.unwrap();

    let value = serde_json::to_value(&result.elements).unwrap();
    let schematic = &value[1];
    assert_eq!(schematic["type"], "schematic_component");
    assert_eq!(schematic["symbol_display_value"], "10k");
    assert_eq!(schematic["port_arrangement"]["top_side"]["pins"], json!([1]));
    assert_eq!(schematic["port_arrangement"]["bottom_side"]["direction"], "left-to-right");
    assert_eq!(schematic["port_labels"], json!({}));
}

#[tokio::test]
async fn empty_footprint_has_zero_size_component() {
    let result = convert(&footprint(json!({}))).await;

    let types: Vec<&str> = result.elements.iter().map(CircuitElement::type_name).collect();
    assert_eq!(types, vec!["source_component", "schematic_component", "pcb_component"]);
    let Some(CircuitElement::PcbComponent(component)) = result.elements_of("pcb_component").next() else {
        panic!("missing pcb_component");
    };
    assert_eq!((component.width, component.height), (0.0, 0.0));
}

#[tokio::test]
async fn conversion_is_deterministic() {
    let document = footprint(json!({
        "pads": [
            { "name": "1", "pad_type": "smd", "pad_shape": "roundrect", "at": { "x": -1.0, "y": 0.0 },
              "size": { "x": 1.0, "y": 1.2 }, "layers": ["F.Cu"], "roundrect_rratio": 0.25 },
            { "name": "2", "pad_type": "thru_hole", "pad_shape": "oval", "at": { "x": 1.0, "y": 0.0 },
              "size": { "x": 1.2, "y": 2.0 }, "drill": { "oval": true, "width": 0.6, "height": 1.0 }, "layers": ["*.Cu"] }
        ],
        "fp_arcs": [{ "start": { "x": 0.0, "y": 1.0 }, "mid": { "x": 1.0, "y": 0.0 }, "end": { "x": 0.0, "y": -1.0 },
                      "layer": "F.Fab", "stroke": stroke(0.1) }]
    }));

    let first = convert(&document).await.to_json(false).unwrap();
    let second = convert(&document).await.to_json(false).unwrap();
    assert_eq!(first, second);
}
