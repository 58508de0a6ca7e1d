use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::texture::CubeImages;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const MAX_ANISOTROPY: u16 = 16;

/// Texture plus the view and sampler its bind groups need
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Successive half-size box-filtered levels down to 1x1, base level first
pub fn mip_chain(image: &RgbaImage) -> Vec<RgbaImage> {
    let mut levels = vec![image.clone()];
    let (mut width, mut height) = image.dimensions();
    if width == 0 || height == 0 {
        return levels;
    }
    while width > 1 || height > 1 {
        width = (width / 2).max(1);
        height = (height / 2).max(1);
        let next = imageops::resize(&levels[levels.len() - 1], width, height, FilterType::Triangle);
        levels.push(next);
    }
    levels
}

fn write_level(queue: &wgpu::Queue, texture: &wgpu::Texture, image: &RgbaImage, mip_level: u32, layer: u32) {
    let (width, height) = image.dimensions();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level,
            origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// Repeating, mipmapped, anisotropically filtered sRGB map
pub fn color_map(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage) -> GpuTexture {
    let levels = mip_chain(image);
    let (width, height) = image.dimensions();

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Color Map"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels.len() as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    for (level, data) in levels.iter().enumerate() {
        write_level(queue, &texture, data, level as u32, 0);
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Color Map Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        anisotropy_clamp: MAX_ANISOTROPY,
        ..Default::default()
    });

    GpuTexture { texture, view, sampler }
}

/// Single-level clamped texture, used for the point sprite
pub fn sprite(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage) -> GpuTexture {
    let (width, height) = image.dimensions();
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Point Sprite"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    write_level(queue, &texture, image, 0, 0);

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = clamped_linear_sampler(device, "Sprite Sampler");
    GpuTexture { texture, view, sampler }
}

/// Six-layer cube in +X, -X, +Y, -Y, +Z, -Z order
pub fn environment(device: &wgpu::Device, queue: &wgpu::Queue, cube: &CubeImages) -> GpuTexture {
    let size = cube.size();
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Environment Cube"),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 6,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    for (layer, face) in cube.faces.iter().enumerate() {
        write_level(queue, &texture, face, 0, layer as u32);
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some("Environment Cube View"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    });
    let sampler = clamped_linear_sampler(device, "Environment Sampler");
    GpuTexture { texture, view, sampler }
}

fn clamped_linear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

/// Depth attachment; `sampled` adds texture binding for the shadow map
pub fn depth_target(device: &wgpu::Device, label: &str, width: u32, height: u32, sampled: bool) -> wgpu::TextureView {
    let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;
    if sampled {
        usage |= wgpu::TextureUsages::TEXTURE_BINDING;
    }
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Hardware 2x2 PCF comparison sampler for the shadow map
pub fn shadow_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Shadow Sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        compare: Some(wgpu::CompareFunction::LessEqual),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_chain_of_square_image() {
        let levels = mip_chain(&RgbaImage::new(64, 64));
        assert_eq!(levels.len(), 7);
        assert_eq!(levels[1].dimensions(), (32, 32));
        assert_eq!(levels[6].dimensions(), (1, 1));
    }

    #[test]
    fn test_mip_chain_of_wide_image_clamps_height() {
        let levels = mip_chain(&RgbaImage::new(8, 2));
        let sizes: Vec<_> = levels.iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn test_mip_chain_averages_color() {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255]));
        let levels = mip_chain(&image);
        assert_eq!(levels.last().unwrap().get_pixel(0, 0), &image::Rgba([200, 100, 50, 255]));
    }
}
