// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Surface editing behaviour under random gesture sequences

use anyhow::Result;
use approx::assert_relative_eq;
use lithoframe::geometry::{build_split_path, nearest_edge, nearest_vertex, simplify};
use lithoframe::{Editor, LineSegment, Outcome, Point, Size, Split, Surface, SurfaceCommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_ring(rng: &mut StdRng, n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(n + 1);
    let mut ys = Vec::with_capacity(n + 1);
    for i in 0..n {
        let angle = i as f64 / n as f64 * std::f64::consts::TAU;
        let radius = rng.gen_range(20.0..45.0);
        xs.push(50.0 + radius * angle.cos());
        ys.push(50.0 + radius * angle.sin());
    }
    xs.push(xs[0]);
    ys.push(ys[0]);
    (xs, ys)
}

fn random_command(rng: &mut StdRng, len: usize) -> SurfaceCommand {
    let coord = |rng: &mut StdRng| {
        if rng.gen_bool(0.1) {
            None
        } else {
            Some(rng.gen_range(0.0..100.0))
        }
    };
    let index = |rng: &mut StdRng| {
        if rng.gen_bool(0.1) {
            None
        } else {
            Some(rng.gen_range(0..len + 2))
        }
    };
    match rng.gen_range(0..8) {
        0 => SurfaceCommand::StartDraw { x: coord(rng), y: coord(rng) },
        1 => SurfaceCommand::ContinueDraw { x: coord(rng), y: coord(rng) },
        2 => SurfaceCommand::EndDraw,
        3 => SurfaceCommand::MoveVertex { index: index(rng), x: coord(rng), y: coord(rng) },
        4 => SurfaceCommand::DeleteVertex { index: index(rng) },
        5 => SurfaceCommand::Undo,
        6 => SurfaceCommand::Redo,
        _ => {
            let (x, y) = (coord(rng), coord(rng));
            SurfaceCommand::InsertAtEdge { edge: None, x, y }
        }
    }
}

#[test]
fn test_split_line_is_always_normalized() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let mut a = Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
        let b = Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
        if rng.gen_bool(0.2) {
            a.y = b.y;
        }
        let split = Split::from_line(LineSegment::new(a, b));
        let first = split.line();
        assert!(first.a.y < first.b.y || (first.a.y == first.b.y && first.a.x <= first.b.x));
        assert_eq!(split.line(), first);
    }
}

#[test]
fn test_random_gestures_keep_curve_consistent() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut surface = Surface::new(Size::new(50.0, 50.0));
    let (xs, ys) = random_ring(&mut rng, 12);
    surface.set_curve(xs, ys);

    for _ in 0..2_000 {
        let mut command = random_command(&mut rng, surface.len());
        if let SurfaceCommand::InsertAtEdge { x: Some(qx), y: Some(qy), .. } = command {
            command = SurfaceCommand::InsertAtEdge {
                edge: surface.pick_edge(qx, qy),
                x: Some(qx),
                y: Some(qy),
            };
        }
        surface.apply(command);
        assert_eq!(surface.x().len(), surface.y().len());
    }
}

#[test]
fn test_undo_then_redo_restores_state() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut surface = Surface::default();
    let (xs, ys) = random_ring(&mut rng, 10);
    surface.set_curve(xs, ys);

    for _ in 0..100 {
        let index = rng.gen_range(0..surface.len());
        let moved = surface.move_vertex(
            Some(index),
            Some(rng.gen_range(0.0..100.0)),
            Some(rng.gen_range(0.0..100.0)),
        );
        assert!(moved);

        let after = (surface.x().to_vec(), surface.y().to_vec());
        assert_eq!(surface.apply(SurfaceCommand::Undo), Outcome::Applied);
        assert_eq!(surface.apply(SurfaceCommand::Redo), Outcome::Applied);
        assert_eq!((surface.x().to_vec(), surface.y().to_vec()), after);
    }
}

#[test]
fn test_absent_coordinates_are_no_ops() {
    let mut surface = Surface::default();
    let gestures = [
        SurfaceCommand::StartDraw { x: None, y: None },
        SurfaceCommand::ContinueDraw { x: Some(1.0), y: None },
        SurfaceCommand::EndDraw,
        SurfaceCommand::InsertAtEdge { edge: None, x: None, y: Some(1.0) },
        SurfaceCommand::MoveVertex { index: Some(0), x: Some(1.0), y: Some(1.0) },
        SurfaceCommand::DeleteVertex { index: None },
        SurfaceCommand::SetSplitEndpoint { x: None, y: Some(1.0), first: true },
        SurfaceCommand::Undo,
        SurfaceCommand::Redo,
    ];
    for gesture in gestures {
        assert_eq!(surface.apply(gesture), Outcome::Ignored, "{:?}", gesture);
    }
    assert!(surface.is_empty());
    assert!(surface.splits().is_empty());
}

#[test]
fn test_simplify_properties() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let n = rng.gen_range(3..200);
        let (xs, ys) = random_ring(&mut rng, n);
        let target = rng.gen_range(0..80);

        let (sx, sy) = simplify(&xs, &ys, target);
        assert!(sx.len() <= xs.len());
        assert_eq!(sx.len(), sy.len());
        assert_eq!((sx[0], sy[0]), (sx[sx.len() - 1], sy[sy.len() - 1]));

        let again = simplify(&sx, &sy, target);
        assert_eq!(again, (sx, sy));
    }
}

#[test]
fn test_nearest_queries() {
    assert_eq!(nearest_vertex(&[0.0, 10.0], &[0.0, 0.0], 1.0, 0.0), Some(0));
    assert_eq!(nearest_vertex(&[], &[], 1.0, 0.0), None);
    assert_eq!(nearest_edge(&[5.0], &[5.0], 0.0, 0.0), None);
}

#[test]
fn test_split_scenario_through_commands() -> Result<()> {
    let mut surface = Surface::default();
    surface.apply(SurfaceCommand::SetSplitEndpoint { x: Some(80.0), y: Some(20.0), first: true });
    surface.apply(SurfaceCommand::SetSplitEndpoint { x: Some(10.0), y: Some(90.0), first: false });

    let line = surface
        .splits()
        .first()
        .map(Split::line)
        .ok_or_else(|| anyhow::anyhow!("split was not created"))?;
    println!("split line: {:?}", line);
    assert!(line.a.y <= line.b.y);
    assert!((line.a.x - 0.8).abs() < 1e-12);
    assert!((line.b.y - 0.9).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_editor_split_paths_match_cell_space_path() {
    let mut editor = Editor::default();
    editor.apply(SurfaceCommand::SetSplitEndpoint { x: Some(100.0), y: Some(0.0), first: true });
    editor.apply(SurfaceCommand::SetSplitEndpoint { x: Some(50.0), y: Some(100.0), first: false });

    let plot_scale = editor.config().plot_scale;
    let size = editor.active_layer().map(|l| l.size).unwrap_or_default();
    let line = editor.active_layer().unwrap().splits()[0].line();
    let (cell_xs, cell_ys) = build_split_path(&line.a, &line.b, size.x, size.y);

    let (xs, ys) = &editor.split_paths()[0];
    assert_eq!(xs.len(), 51);
    assert_eq!(xs.len(), cell_xs.len());
    for (plot, cell) in xs.iter().zip(&cell_xs) {
        assert_relative_eq!(*plot, cell * plot_scale / size.x, epsilon = 1e-9);
    }
    for (plot, cell) in ys.iter().zip(&cell_ys) {
        assert_relative_eq!(*plot, cell * plot_scale / size.y, epsilon = 1e-9);
    }
}
