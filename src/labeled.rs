//! Accessor for the labeled subset of the NYU Depth V2 dataset.

use crate::error::{DatasetError, Result};
use crate::orient::{self, DepthImage};
use crate::string_ref;
use hdf5::{Dataset, File, ObjectReference1};
use image::{GrayImage, RgbImage};
use log::debug;
use ndarray::{s, Ix2, Ix3};
use std::cell::RefCell;
use std::path::Path;

/// One aligned record of the labeled dataset.
///
/// All three images are in the conventional upright orientation; their
/// dimensions are the stored height and width swapped (see
/// [`LabeledDataset::get`]).
#[derive(Debug, Clone)]
pub struct Sample {
    /// 8-bit RGB color image.
    pub color: RgbImage,
    /// Single-channel floating-point depth map, in meters.
    pub depth: DepthImage,
    /// Single-channel 8-bit per-pixel class labels; 0 means unlabeled.
    pub label: GrayImage,
    /// Decoded scene type, e.g. `"kitchen"`.
    pub scene_type: String,
    /// Decoded scene name, e.g. `"kitchen_0004"`.
    pub scene_name: String,
}

/// Random-access reader for `nyu_depth_v2_labeled.mat`.
///
/// The accessor keeps the HDF5 file open for its whole lifetime and reads
/// one record per [`get`](Self::get) call; nothing is cached except the
/// label-name table. It is single-threaded by contract: sharing one
/// instance across threads is not supported.
///
/// The file is released when the accessor is dropped, or earlier via
/// [`close`](Self::close). Every operation on a closed accessor fails with
/// [`DatasetError::Closed`].
///
/// # Example
///
/// ```no_run
/// use nyuv2::LabeledDataset;
///
/// let dataset = LabeledDataset::open("dataset/nyu_depth_v2_labeled.mat")?;
/// for index in 0..dataset.len()? {
///     let sample = dataset.get(index)?;
///     println!("{index}: {} ({})", sample.scene_name, sample.scene_type);
/// }
/// # Ok::<_, nyuv2::DatasetError>(())
/// ```
#[derive(Debug)]
pub struct LabeledDataset {
    inner: Option<Inner>,
    label_names: RefCell<Option<Vec<String>>>,
}

#[derive(Debug)]
struct Inner {
    file: File,
    color_maps: Dataset,
    depth_maps: Dataset,
    label_maps: Dataset,
    scene_types: Vec<ObjectReference1>,
    scene_names: Vec<ObjectReference1>,
    len: usize,
}

impl LabeledDataset {
    /// Opens the labeled dataset file at `path` for reading.
    ///
    /// Captures handles to the `images`, `depths`, and `labels` arrays and
    /// reads the `sceneTypes` and `scenes` reference tables eagerly. Label
    /// names are not decoded until [`label_names`](Self::label_names) is
    /// first called.
    ///
    /// Fails with [`DatasetError::NotFound`] if `path` does not exist, and
    /// with one of the format errors if a required array is absent, has the
    /// wrong rank or shape, or if the parallel arrays disagree on the
    /// sample count.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_owned()));
        }
        let file = File::open(path)?;

        let color_maps = required_array(&file, "images", 4)?;
        let depth_maps = required_array(&file, "depths", 3)?;
        let label_maps = required_array(&file, "labels", 3)?;
        let shape = color_maps.shape();
        if shape[1] != 3 {
            return Err(DatasetError::BadShape { name: "images", shape });
        }
        let len = shape[0];
        for (name, maps) in [("depths", &depth_maps), ("labels", &label_maps)] {
            let n = maps.shape()[0];
            if n != len {
                return Err(DatasetError::LengthMismatch { name, len: n, expected: len });
            }
        }

        let scene_types = reference_row(&file, "sceneTypes")?;
        let scene_names = reference_row(&file, "scenes")?;
        for (name, refs) in [("sceneTypes", &scene_types), ("scenes", &scene_names)] {
            if refs.len() != len {
                return Err(DatasetError::LengthMismatch { name, len: refs.len(), expected: len });
            }
        }

        debug!("opened labeled dataset {} ({len} samples)", path.display());
        Ok(Self {
            inner: Some(Inner {
                file,
                color_maps,
                depth_maps,
                label_maps,
                scene_types,
                scene_names,
                len,
            }),
            label_names: RefCell::new(None),
        })
    }

    /// Closes the underlying HDF5 file.
    ///
    /// Dropping the accessor closes the file as well; calling `close`
    /// merely releases it early. Closing is terminal and idempotent: after
    /// the first call, every other operation fails with
    /// [`DatasetError::Closed`].
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            debug!("closed labeled dataset");
        }
    }

    /// Returns the number of samples in the dataset.
    pub fn len(&self) -> Result<usize> {
        Ok(self.inner()?.len)
    }

    /// Returns `true` if the dataset holds no samples.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.inner()?.len == 0)
    }

    /// Reads the sample at `index`.
    ///
    /// This is a pure read: the raw color array is reordered from
    /// channel-first to channel-last, all three images are rotated 90°
    /// clockwise into the upright orientation (swapping width and height),
    /// and the scene type and name are decoded from their string
    /// references. Depth values pass through unmodified; label values are
    /// narrowed to 8 bits with a wrapping cast.
    pub fn get(&self, index: usize) -> Result<Sample> {
        let inner = self.inner()?;
        if index >= inner.len {
            return Err(DatasetError::IndexOutOfRange { index, len: inner.len });
        }

        let color_raw = inner.color_maps.read_slice::<u8, _, Ix3>(s![index, .., .., ..])?;
        let depth_raw = inner.depth_maps.read_slice::<f32, _, Ix2>(s![index, .., ..])?;
        let label_raw = inner.label_maps.read_slice::<u16, _, Ix2>(s![index, .., ..])?;
        let scene_type = string_ref::decode(&inner.file, &inner.scene_types[index])?;
        let scene_name = string_ref::decode(&inner.file, &inner.scene_names[index])?;

        Ok(Sample {
            color: orient::color_image(color_raw.view()),
            depth: orient::depth_image(depth_raw.view()),
            label: orient::label_image(label_raw.view()),
            scene_type,
            scene_name,
        })
    }

    /// Returns the label-name table.
    ///
    /// Entry 0 is always `"unlabeled"`, followed by one decoded name per
    /// entry of the `names` array, so label value `v` indexes the table
    /// directly. The table is decoded on the first call and cached for the
    /// accessor's lifetime; later calls return the cached names unchanged.
    pub fn label_names(&self) -> Result<Vec<String>> {
        let inner = self.inner()?;
        let mut cache = self.label_names.borrow_mut();
        if let Some(names) = cache.as_ref() {
            return Ok(names.clone());
        }

        let refs = reference_row(&inner.file, "names")?;
        let mut names = Vec::with_capacity(refs.len() + 1);
        names.push(String::from("unlabeled"));
        for reference in &refs {
            names.push(string_ref::decode(&inner.file, reference)?);
        }
        debug!("decoded {} label names", refs.len());
        *cache = Some(names.clone());
        Ok(names)
    }

    /// Returns the raw per-sample scene-type reference entries.
    ///
    /// This is a deliberate low-level passthrough: unlike
    /// [`get`](Self::get), which hands back decoded strings, this exposes
    /// the undecoded references. Decode individual entries with
    /// [`decode_string_ref`](Self::decode_string_ref).
    pub fn scene_type_refs(&self) -> Result<&[ObjectReference1]> {
        Ok(&self.inner()?.scene_types)
    }

    /// Returns the raw per-sample scene-name reference entries.
    ///
    /// Low-level passthrough; see [`scene_type_refs`](Self::scene_type_refs).
    pub fn scene_name_refs(&self) -> Result<&[ObjectReference1]> {
        Ok(&self.inner()?.scene_names)
    }

    /// Decodes one string reference entry from this dataset's file.
    pub fn decode_string_ref(&self, reference: &ObjectReference1) -> Result<String> {
        string_ref::decode(&self.inner()?.file, reference)
    }

    fn inner(&self) -> Result<&Inner> {
        self.inner.as_ref().ok_or(DatasetError::Closed)
    }
}

/// Looks up a required top-level array and checks its rank.
fn required_array(file: &File, name: &'static str, expected: usize) -> Result<Dataset> {
    let dataset = file.dataset(name).map_err(|_| DatasetError::MissingArray(name))?;
    let ndim = dataset.ndim();
    if ndim != expected {
        return Err(DatasetError::WrongNdim { name, ndim, expected });
    }
    Ok(dataset)
}

/// Reads row 0 of a `(1, N)` table of object references.
fn reference_row(file: &File, name: &'static str) -> Result<Vec<ObjectReference1>> {
    let dataset = file.dataset(name).map_err(|_| DatasetError::MissingArray(name))?;
    let ndim = dataset.ndim();
    if ndim != 2 {
        return Err(DatasetError::WrongNdim { name, ndim, expected: 2 });
    }
    let refs = dataset.read_2d::<ObjectReference1>()?;
    if refs.nrows() != 1 {
        return Err(DatasetError::BadShape { name, shape: refs.shape().to_vec() });
    }
    Ok(refs.row(0).to_vec())
}
