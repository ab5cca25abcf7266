use bytemuck::bytes_of;
use glam::{Mat4, Vec3};
use preview_runtime::{
    Camera, DirectionalLightParams, LightPack, Scene, Transform, MAX_POINT_LIGHTS,
};

/// Reference draw from the data contract: camera at (0,0,5) looking at the
/// origin, one white directional light shining straight down.
#[test]
fn reference_draw_parameters() {
    let mut camera = Camera::new(Transform::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO));
    camera.target = Some(Vec3::ZERO);

    let params = camera.params();
    assert_eq!(params.position, [0.0, 0.0, 5.0]);

    let view = Mat4::from_cols_array_2d(&params.view);
    let projection = Mat4::from_cols_array_2d(&params.projection);
    assert!(view.determinant().abs() > f32::EPSILON);
    assert!(projection.determinant().abs() > f32::EPSILON);

    let eye = view.inverse().transform_point3(Vec3::ZERO);
    assert!(eye.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));

    let mut pack = LightPack::new();
    pack.push_directional(DirectionalLightParams::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::ONE,
    ))
    .unwrap();

    assert_eq!(pack.count.direction, 1);
    assert_eq!(pack.count.spot, 0);
    assert_eq!(pack.count.point, 0);

    let slot = &pack.active_directional()[0];
    assert_eq!(slot.direction, [0.0, -1.0, 0.0]);
    assert_eq!(slot.color, [1.0, 1.0, 1.0]);
}

/// The full host flow: authoring XML in, parameter blocks out.
#[test]
fn scene_to_parameter_blocks() {
    let xml = r#"<scene>
      <camera>
        <position>0 2 6</position>
        <target>0 0 0</target>
      </camera>
      <light>
        <kind>directional</kind>
        <eulers>0 180 0</eulers>
      </light>
      <light>
        <kind>spot</kind>
        <position>0 4 0</position>
        <eulers>0 180 0</eulers>
        <angle>25</angle>
      </light>
    </scene>"#;

    let scene = Scene::from_xml(xml).unwrap();
    let pack = scene.light_pack().unwrap();

    assert_eq!(pack.count.direction, 1);
    assert_eq!(pack.count.spot, 1);
    assert_eq!(pack.count.point, 0);
    assert!(pack.active_point().is_empty());

    let spot = &pack.active_spot()[0];
    assert_eq!(spot.position, [0.0, 4.0, 0.0]);
    assert!((spot.angle - 25.0f32.to_radians()).abs() < 1e-6);

    // The upload for an absent kind is still a full, zeroed array.
    let point_bytes: &[u8] = bytemuck::cast_slice(&pack.point);
    assert_eq!(point_bytes.len(), MAX_POINT_LIGHTS * 32);
    assert!(point_bytes.iter().all(|byte| *byte == 0));
}

/// Two independently assembled encodings of the same block must agree byte
/// for byte.
#[test]
fn camera_block_encoding_is_stable() {
    let mut camera = Camera::new(Transform::new(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO));
    camera.target = Some(Vec3::ZERO);
    camera.aspect = 16.0 / 9.0;

    let first = camera.params();
    let second = camera.params();
    assert_eq!(bytes_of(&first), bytes_of(&second));
    assert_eq!(bytes_of(&first).len(), 144);
}
