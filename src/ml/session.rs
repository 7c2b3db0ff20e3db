// ============================================================
// Layer 5 — Backend Session
// ============================================================
// Picks the burn backend at runtime and hides the generic
// Inferencer<B> behind one concrete type.
//
//   cpu  → NdArray (no GPU needed)
//   wgpu → Wgpu (Vulkan / Metal / DX12)

use anyhow::Result;

use crate::application::RunConfig;
use crate::domain::{array::HostArray, backend::BackendKind, shape::GraphShape};
use crate::ml::inferencer::{ElboReport, Inferencer};
use crate::ml::model::VaeConfig;

type CpuBackend  = burn::backend::NdArray;
type WgpuBackend = burn::backend::Wgpu;

pub enum Session {
    Cpu(Inferencer<CpuBackend>),
    Wgpu(Inferencer<WgpuBackend>),
}

macro_rules! dispatch {
    ($session:expr, $inf:ident => $body:expr) => {
        match $session {
            Session::Cpu($inf) => $body,
            Session::Wgpu($inf) => $body,
        }
    };
}

impl Session {
    pub fn new(cfg: &RunConfig) -> Result<Self> {
        let vae_cfg = VaeConfig::new(cfg.img_size)
            .with_batch_size(cfg.batch_size)
            .with_latent_size(cfg.latent_size)
            .with_sample_size(cfg.sample_size)
            .with_units(cfg.units);

        let session = match cfg.backend {
            BackendKind::Cpu => {
                tracing::info!("Using NdArray CPU backend");
                Session::Cpu(Inferencer::new(&vae_cfg, Default::default())?)
            }
            BackendKind::Wgpu => {
                let device = burn::backend::wgpu::WgpuDevice::default();
                tracing::info!("Using WGPU device: {:?}", device);
                Session::Wgpu(Inferencer::new(&vae_cfg, device)?)
            }
        };
        Ok(session)
    }

    pub fn shape(&self) -> GraphShape {
        dispatch!(self, inf => inf.shape())
    }

    pub fn elbo(&self, images: &HostArray) -> Result<ElboReport> {
        dispatch!(self, inf => inf.elbo(images))
    }

    pub fn encode(&self, images: &HostArray) -> Result<HostArray> {
        dispatch!(self, inf => inf.encode(images))
    }

    pub fn decode(&self, latent: &HostArray) -> Result<HostArray> {
        dispatch!(self, inf => inf.decode(latent))
    }

    pub fn reconstruct(&self, images: &HostArray) -> Result<HostArray> {
        dispatch!(self, inf => inf.reconstruct(images))
    }

    pub fn generate(&self) -> Result<HostArray> {
        dispatch!(self, inf => inf.generate())
    }
}
