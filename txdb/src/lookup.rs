//! Output lookup by outpoint.
//!
//! Reads only the committed output set. An outpoint which is not in the store resolves to `None`, whether it
//! never existed or was already spent.

use ledger_core::trace;
use ledger_database::prelude::StoreResultExt;

use crate::{
    IDENT,
    errors::{TxDbError, TxDbResult},
    model::{Outpoint, OwnedOutput, Output},
    stores::unspent_outputs::UnspentOutputsStoreReader,
};

/// Returns the committed output held by `outpoint`, or `None` if the outpoint is not an unspent output.
pub fn lookup_output<S>(store: &S, outpoint: &Outpoint) -> TxDbResult<Option<Output>>
where
    S: UnspentOutputsStoreReader + ?Sized,
{
    trace!("[{0}] looking up output {1}", IDENT, outpoint);
    let record = store.get(outpoint).optional().map_err(TxDbError::from_read)?;
    Ok(record.map(|record| Output::from_record(*outpoint, record)))
}

/// Same as [`lookup_output`], also returning who owns the output.
pub fn lookup_owned_output<S>(store: &S, outpoint: &Outpoint) -> TxDbResult<Option<OwnedOutput>>
where
    S: UnspentOutputsStoreReader + ?Sized,
{
    trace!("[{0}] looking up owned output {1}", IDENT, outpoint);
    let record = store.get(outpoint).optional().map_err(TxDbError::from_read)?;
    Ok(record.map(|record| OwnedOutput::from_record(*outpoint, record)))
}

/// Looks up several outpoints. The result is aligned with `outpoints`; the first storage failure aborts the call.
pub fn lookup_outputs<S>(store: &S, outpoints: &[Outpoint]) -> TxDbResult<Vec<Option<Output>>>
where
    S: UnspentOutputsStoreReader + ?Sized,
{
    trace!("[{0}] looking up {1} outputs", IDENT, outpoints.len());
    outpoints.iter().map(|outpoint| lookup_output(store, outpoint)).collect()
}
