use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rs_pbrt_quad::core::geometry::{Normal3f, Point2f, Point3f, Vector3f};
use rs_pbrt_quad::core::interaction::InteractionCommon;
use rs_pbrt_quad::core::pbrt::Float;
use rs_pbrt_quad::core::shape::Shape;
use rs_pbrt_quad::core::transform::Transform;
use rs_pbrt_quad::shapes::quad::{Quad, QuadAxis};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn quad_z(l1: Float, l2: Float, object_to_world: Transform) -> Quad {
    Quad::new(
        QuadAxis::Z,
        object_to_world,
        Transform::inverse(&object_to_world),
        false,
        l1,
        l2,
        1.0,
        0.0,
        0.0,
        1.0,
        1.0,
        None,
    )
}

#[test]
fn samples_cover_the_rectangle_uniformly() {
    init_logging();
    // u runs along y (l1), v along x (l2)
    let quad = quad_z(2.0, 4.0, Transform::default());
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let n_samples: usize = 10_000;
    let mut bins = [[0_usize; 4]; 4];
    for _ in 0..n_samples {
        let u = Point2f {
            x: rng.gen::<Float>(),
            y: rng.gen::<Float>(),
        };
        let mut pdf: Float = 0.0;
        let it = quad.sample(&u, &mut pdf);
        assert_eq!(pdf, 1.0 / 8.0);
        assert_eq!(it.p.z, 0.0);
        assert!(it.p.y.abs() <= 1.0, "{:?}", it.p);
        assert!(it.p.x.abs() <= 2.0, "{:?}", it.p);
        assert_eq!(
            it.n,
            Normal3f {
                x: 0.0,
                y: 0.0,
                z: 1.0
            }
        );
        let i = (((it.p.y + 1.0) / 2.0 * 4.0) as usize).min(3);
        let j = (((it.p.x + 2.0) / 4.0 * 4.0) as usize).min(3);
        bins[i][j] += 1;
    }
    let expected = n_samples / 16;
    for row in bins.iter() {
        for count in row.iter() {
            // about five standard deviations
            assert!(
                (*count as i64 - expected as i64).abs() < 125,
                "bins = {:?}",
                bins
            );
        }
    }
}

#[test]
fn solid_angle_densities_agree() {
    init_logging();
    let object_to_world = Transform::translate(&Vector3f {
        x: 0.5,
        y: -0.25,
        z: 0.0,
    });
    let quad = quad_z(1.0, 2.0, object_to_world);
    let iref = InteractionCommon {
        p: Point3f {
            x: 0.0,
            y: 0.0,
            z: 3.0,
        },
        n: Normal3f {
            x: 0.0,
            y: 0.0,
            z: -1.0,
        },
        ..Default::default()
    };
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..100 {
        let u = Point2f {
            x: rng.gen_range(0.05..0.95),
            y: rng.gen_range(0.05..0.95),
        };
        let mut pdf: Float = 0.0;
        let it = quad.sample_with_ref_point(&iref, &u, &mut pdf);
        assert!(pdf > 0.0);
        let wi: Vector3f = (it.p - iref.p).normalize();
        let pdf_dir = quad.pdf_with_ref_point(&iref, &wi);
        assert!(
            ((pdf - pdf_dir) / pdf).abs() < 1e-3,
            "sampled {} vs evaluated {}",
            pdf,
            pdf_dir
        );
        // a shadow ray towards the sample stops short of the quad
        let shadow = iref.spawn_ray_to(&it);
        assert!(!quad.intersect_p(&shadow, true));
    }
    // looking away from the quad
    let up = Vector3f {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
    assert_eq!(quad.pdf_with_ref_point(&iref, &up), 0.0);
    assert_eq!(quad.pdf(&iref), 0.5);
}

#[test]
fn coincident_reference_point_has_zero_density() {
    init_logging();
    let quad = quad_z(2.0, 2.0, Transform::default());
    let iref = InteractionCommon::default();
    let mut pdf: Float = 0.0;
    // the center of the remapped domain samples the origin
    let it = quad.sample_with_ref_point(&iref, &Point2f { x: 0.5, y: 0.5 }, &mut pdf);
    assert_eq!(it.p, Point3f::default());
    assert_eq!(pdf, 0.0);
}
