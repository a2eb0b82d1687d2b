//! Graphics context handle
//!
//! Owns the wgpu instance, adapter, device and queue for the active render
//! API. The host creates one [`GraphicsContext`] and passes it explicitly to
//! whoever needs GPU access; the selected [`RenderApi`] is also recorded on
//! the application so the editor can show and change it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use winit::window::Window;

/// Errors raised while bringing up the graphics context
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("no compatible adapter for {api}: {source}")]
    Adapter {
        api: RenderApi,
        #[source]
        source: wgpu::RequestAdapterError,
    },
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Render backend the application runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderApi {
    #[serde(rename = "opengl")]
    OpenGl,
    #[serde(rename = "vulkan")]
    Vulkan,
    #[serde(rename = "direct3d")]
    Direct3D,
    #[serde(rename = "metal")]
    Metal,
}

impl Default for RenderApi {
    /// The native API of the target platform
    fn default() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            RenderApi::Metal
        } else if cfg!(target_os = "windows") {
            RenderApi::Direct3D
        } else {
            RenderApi::Vulkan
        }
    }
}

impl RenderApi {
    pub const ALL: [RenderApi; 4] = [
        RenderApi::OpenGl,
        RenderApi::Vulkan,
        RenderApi::Direct3D,
        RenderApi::Metal,
    ];

    /// APIs that can exist on the current platform
    pub fn available() -> Vec<RenderApi> {
        Self::ALL
            .into_iter()
            .filter(|api| api.is_supported_on_platform())
            .collect()
    }

    pub fn is_supported_on_platform(self) -> bool {
        match self {
            RenderApi::OpenGl => true,
            RenderApi::Vulkan => !cfg!(target_os = "macos") && !cfg!(target_os = "ios"),
            RenderApi::Direct3D => cfg!(target_os = "windows"),
            RenderApi::Metal => cfg!(target_os = "macos") || cfg!(target_os = "ios"),
        }
    }

    pub fn backends(self) -> wgpu::Backends {
        match self {
            RenderApi::OpenGl => wgpu::Backends::GL,
            RenderApi::Vulkan => wgpu::Backends::VULKAN,
            RenderApi::Direct3D => wgpu::Backends::DX12,
            RenderApi::Metal => wgpu::Backends::METAL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderApi::OpenGl => "OpenGL",
            RenderApi::Vulkan => "Vulkan",
            RenderApi::Direct3D => "Direct3D",
            RenderApi::Metal => "Metal",
        }
    }

    /// Map the backend wgpu actually picked back to a render API
    pub fn from_backend(backend: wgpu::Backend) -> Option<RenderApi> {
        match backend {
            wgpu::Backend::Gl => Some(RenderApi::OpenGl),
            wgpu::Backend::Vulkan => Some(RenderApi::Vulkan),
            wgpu::Backend::Dx12 => Some(RenderApi::Direct3D),
            wgpu::Backend::Metal => Some(RenderApi::Metal),
            _ => None,
        }
    }
}

impl std::fmt::Display for RenderApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Adapter details shown by the editor's graphics info window
#[derive(Debug, Clone)]
pub struct GraphicsInfo {
    pub api: RenderApi,
    pub adapter_name: String,
    pub driver: String,
    pub driver_info: String,
    pub device_type: String,
    pub max_texture_dimension_2d: u32,
    pub max_bind_groups: u32,
}

impl GraphicsInfo {
    pub fn from_adapter(api: RenderApi, info: &wgpu::AdapterInfo, limits: &wgpu::Limits) -> Self {
        Self {
            api,
            adapter_name: info.name.clone(),
            driver: info.driver.clone(),
            driver_info: info.driver_info.clone(),
            device_type: format!("{:?}", info.device_type),
            max_texture_dimension_2d: limits.max_texture_dimension_2d,
            max_bind_groups: limits.max_bind_groups,
        }
    }
}

/// GPU handle for one render API
pub struct GraphicsContext {
    pub instance: wgpu::Instance,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    adapter: wgpu::Adapter,
    api: RenderApi,
    info: GraphicsInfo,
}

impl GraphicsContext {
    /// Create an instance restricted to the backends of `api`
    pub fn create_instance(api: RenderApi) -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: api.backends(),
            ..Default::default()
        })
    }

    /// Create a context and a surface for `window`.
    ///
    /// When `requested` has no adapter on this machine every backend is tried
    /// instead, so a stale config entry cannot keep the editor from starting.
    pub async fn for_window(
        window: Arc<Window>,
        requested: RenderApi,
    ) -> Result<(Self, wgpu::Surface<'static>), GraphicsError> {
        let instance = Self::create_instance(requested);
        let surface = instance.create_surface(window.clone())?;
        let first_attempt = Self::new(instance, requested, Some(&surface)).await;
        match first_attempt {
            Ok(context) => Ok((context, surface)),
            Err(GraphicsError::Adapter { source, .. }) => {
                warn!(
                    api = %requested,
                    error = %source,
                    "No adapter for requested render API, trying all backends"
                );
                drop(surface);
                let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                    backends: wgpu::Backends::all(),
                    ..Default::default()
                });
                let surface = instance.create_surface(window)?;
                let context = Self::new(instance, requested, Some(&surface)).await?;
                Ok((context, surface))
            }
            Err(e) => Err(e),
        }
    }

    /// Request an adapter and device from `instance`.
    ///
    /// The recorded API is the one wgpu actually selected, which can differ from
    /// `requested` only when the instance was built with a wider backend set.
    pub async fn new(
        instance: wgpu::Instance,
        requested: RenderApi,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self, GraphicsError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|source| GraphicsError::Adapter {
                api: requested,
                source,
            })?;

        let adapter_info = adapter.get_info();
        let api = RenderApi::from_backend(adapter_info.backend).unwrap_or(requested);
        info!(
            gpu_name = %adapter_info.name,
            backend = ?adapter_info.backend,
            api = %api,
            "GPU adapter selected"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: Some("Editor Device"),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let info = GraphicsInfo::from_adapter(api, &adapter_info, &device.limits());

        Ok(Self {
            instance,
            device: Arc::new(device),
            queue: Arc::new(queue),
            adapter,
            api,
            info,
        })
    }

    pub fn api(&self) -> RenderApi {
        self.api
    }

    pub fn info(&self) -> &GraphicsInfo {
        &self.info
    }

    /// Surface configuration preferring an sRGB format
    pub fn surface_configuration(
        &self,
        surface: &wgpu::Surface,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, GraphicsError> {
        let caps = surface.get_capabilities(&self.adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(GraphicsError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    /// Create a command encoder for recording GPU commands
    pub fn create_command_encoder(&self, label: Option<&str>) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label })
    }

    /// Submit command buffers to the GPU queue
    pub fn submit<I: IntoIterator<Item = wgpu::CommandBuffer>>(&self, command_buffers: I) {
        self.queue.submit(command_buffers);
    }
}
