use super::helpers;
use crate::core::bitmap::Bitmap;
use wgpu;

/// How a texture is addressed when sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wrap {
    /// Repeat horizontally, clamp vertically (equirectangular hull art).
    RepeatU,
    Clamp,
}

/// RGBA8 texture fed from a CPU `Bitmap`.
pub(crate) struct GpuTexture {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) wrap: Wrap,
    width: u32,
    height: u32,
    label: &'static str,
}

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

impl GpuTexture {
    pub(crate) fn new(
        device: &wgpu::Device,
        label: &'static str,
        width: u32,
        height: u32,
        wrap: Wrap,
    ) -> Self {
        let (texture, view) = helpers::create_color_texture(
            device,
            label,
            width,
            height,
            FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        Self {
            texture,
            view,
            wrap,
            width: width.max(1),
            height: height.max(1),
            label,
        }
    }

    /// 1x1 white texture bound by untextured materials.
    pub(crate) fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let tex = Self::new(device, "white_tex", 1, 1, Wrap::Clamp);
        tex.write(queue, &[255, 255, 255, 255]);
        tex
    }

    /// Upload a bitmap. Returns true when the texture had to be recreated,
    /// which invalidates bind groups referencing the old view.
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bitmap: &Bitmap,
    ) -> bool {
        let resized = bitmap.width != self.width || bitmap.height != self.height;
        if resized {
            *self = Self::new(device, self.label, bitmap.width, bitmap.height, self.wrap);
        }
        self.write(queue, &bitmap.pixels);
        resized
    }

    fn write(&self, queue: &wgpu::Queue, pixels: &[u8]) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }
}

pub(crate) fn create_sampler(device: &wgpu::Device, wrap: Wrap) -> wgpu::Sampler {
    let address_mode_u = match wrap {
        Wrap::RepeatU => wgpu::AddressMode::Repeat,
        Wrap::Clamp => wgpu::AddressMode::ClampToEdge,
    };
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("mesh_sampler"),
        address_mode_u,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
