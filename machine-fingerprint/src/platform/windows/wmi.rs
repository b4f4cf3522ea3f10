use std::ops::Deref;

use tracing::debug;
use windows::Win32::Foundation::RPC_E_TOO_LATE;
use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_MULTITHREADED, CoCreateInstance, CoInitializeEx,
    CoInitializeSecurity, CoSetProxyBlanket, CoUninitialize, EOAC_NONE, RPC_C_AUTHN_LEVEL_CALL,
    RPC_C_AUTHN_LEVEL_DEFAULT, RPC_C_IMP_LEVEL_IMPERSONATE,
};
use windows::Win32::System::Rpc::{RPC_C_AUTHN_WINNT, RPC_C_AUTHZ_NONE};
use windows::Win32::System::Variant::{VARIANT, VT_BSTR, VariantClear};
use windows::Win32::System::Wmi::{
    IEnumWbemClassObject, IWbemClassObject, IWbemLocator, IWbemServices, WBEM_FLAG_FORWARD_ONLY,
    WBEM_FLAG_RETURN_IMMEDIATELY, WBEM_GENERIC_FLAG_TYPE, WBEM_INFINITE, WbemLocator,
};
use windows::core::{BSTR, PCWSTR, w};

use crate::error::ProviderError;
use crate::platform::select::first_string;
use crate::scoped::Scoped;

const BASEBOARD_QUERY: &str = "SELECT SerialNumber FROM Win32_BaseBoard";

/// COM apartment for the current thread, uninitialized on drop.
struct ComSession {
    _apartment: Scoped<()>,
}

impl ComSession {
    fn begin() -> windows::core::Result<Self> {
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED).ok()? };
        let session = ComSession {
            _apartment: Scoped::new((), |_| unsafe { CoUninitialize() }),
        };

        // Process-wide; a host that already set security gets RPC_E_TOO_LATE,
        // which leaves its settings in place and is fine for a local query.
        let security = unsafe {
            CoInitializeSecurity(
                None,
                -1,
                None,
                None,
                RPC_C_AUTHN_LEVEL_DEFAULT,
                RPC_C_IMP_LEVEL_IMPERSONATE,
                None,
                EOAC_NONE,
                None,
            )
        };
        if let Err(e) = security {
            if e.code() != RPC_E_TOO_LATE {
                return Err(e);
            }
            debug!("COM security already initialized by host");
        }

        Ok(session)
    }

    fn connect(&self, namespace: &str) -> windows::core::Result<IWbemServices> {
        unsafe {
            let locator: IWbemLocator =
                CoCreateInstance(&WbemLocator, None, CLSCTX_INPROC_SERVER)?;
            let services = locator.ConnectServer(
                &BSTR::from(namespace),
                &BSTR::new(),
                &BSTR::new(),
                &BSTR::new(),
                0,
                &BSTR::new(),
                None,
            )?;
            CoSetProxyBlanket(
                &services,
                RPC_C_AUTHN_WINNT,
                RPC_C_AUTHZ_NONE,
                None,
                RPC_C_AUTHN_LEVEL_CALL,
                RPC_C_IMP_LEVEL_IMPERSONATE,
                None,
                EOAC_NONE,
            )?;
            Ok(services)
        }
    }
}

fn read_bstr_property(obj: &IWbemClassObject, name: PCWSTR) -> Option<String> {
    unsafe {
        let mut val: VARIANT = std::mem::zeroed();
        if obj.Get(name, 0, &mut val, None, None).is_err() {
            return None;
        }
        let result = if val.Anonymous.Anonymous.vt == VT_BSTR {
            let b = val.Anonymous.Anonymous.Anonymous.bstrVal.deref();
            String::try_from(b).ok()
        } else {
            None
        };
        let _ = VariantClear(&mut val);
        result
    }
}

/// `SerialNumber` of the first `Win32_BaseBoard` row that has one.
pub fn baseboard_serial() -> Result<String, ProviderError> {
    // Interfaces below are released by their own Drop before the session ends.
    let session = ComSession::begin()?;
    let services = session.connect(r"ROOT\CIMV2")?;

    let flags = WBEM_GENERIC_FLAG_TYPE(WBEM_FLAG_FORWARD_ONLY.0 | WBEM_FLAG_RETURN_IMMEDIATELY.0);
    let enumerator: IEnumWbemClassObject = unsafe {
        services.ExecQuery(
            &BSTR::from("WQL"),
            &BSTR::from(BASEBOARD_QUERY),
            flags,
            None,
        )?
    };

    let rows = std::iter::from_fn(|| {
        let mut row = [None];
        let mut returned = 0;
        let next = unsafe { enumerator.Next(WBEM_INFINITE, &mut row, &mut returned) };
        if let Err(e) = next.ok() {
            debug!(error = %e, "Win32_BaseBoard enumeration failed");
            return None;
        }
        if returned == 0 {
            return None;
        }
        Some(
            row[0]
                .as_ref()
                .and_then(|obj| read_bstr_property(obj, w!("SerialNumber"))),
        )
    });

    first_string(rows).ok_or(ProviderError::Missing("Win32_BaseBoard.SerialNumber"))
}
